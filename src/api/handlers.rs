use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::OpenApi;

use super::errors::ApiError;
use crate::store::{models::SensorReading, ReadingStore};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GetDataParams {
    /// Device id the reading was stored under.
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Validate one sensor reading and store it under its `device_id`,
/// overwriting any previous reading for that device.
///
/// The body is bound through `Result<Json<_>, JsonRejection>` so every bind
/// failure (wrong content type, malformed JSON, type mismatch, missing field)
/// answers 400 rather than axum's default 415/422 split.
#[utoipa::path(
    post,
    path = "/process",
    request_body = SensorReading,
    responses(
        (status = 201, description = "Reading stored"),
        (status = 400, description = "Malformed body or unsupported device type"),
        (status = 500, description = "Store write failed"),
    ),
    tag = "sensors"
)]
pub async fn process_reading(
    State(store): State<ReadingStore>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(reading) = payload?;
    reading.validate()?;

    store
        .put(&reading.device_id, &reading)
        .await
        .map_err(|source| ApiError::WriteFailed {
            device_id: reading.device_id.clone(),
            source,
        })?;

    Ok(StatusCode::CREATED)
}

/// Fetch the stored reading for the device named by the `id` query parameter.
///
/// An absent or empty `id` is rejected before the store is contacted. A
/// missing key, a store failure, and a corrupt stored value all answer 400
/// with a message naming the cause.
#[utoipa::path(
    get,
    path = "/getDataById",
    params(
        ("id" = Option<String>, Query, description = "Device id the reading was stored under"),
    ),
    responses(
        (status = 200, description = "Stored sensor reading", body = SensorReading),
        (status = 400, description = "Missing id, unknown device, or store failure"),
    ),
    tag = "sensors"
)]
pub async fn get_data_by_id(
    State(store): State<ReadingStore>,
    Query(params): Query<GetDataParams>,
) -> Result<Json<SensorReading>, ApiError> {
    let device_id = match params.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ApiError::MissingId),
    };

    let reading = store
        .get(device_id)
        .await
        .map_err(|source| ApiError::ReadFailed {
            device_id: device_id.to_owned(),
            source,
        })?;

    Ok(Json(reading))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI document
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(process_reading, get_data_by_id, health),
    components(schemas(SensorReading)),
    tags(
        (name = "sensors", description = "Sensor data endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Sensor Data Service API",
        version = "0.1.0",
        description = "REST API for storing and retrieving sensor readings by device id"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
