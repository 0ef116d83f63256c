use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::{models::UnsupportedDeviceType, StoreError};

/// Request-level failures, mapped onto HTTP status codes in `IntoResponse`.
///
/// Every failure on the read path answers 400, missing key included; the
/// response message still names the specific cause. Only a failed write
/// is a 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be bound to a `SensorReading`.
    #[error("unable to read sensor data from the request body: {0}")]
    Bind(#[from] JsonRejection),

    #[error(transparent)]
    Validation(#[from] UnsupportedDeviceType),

    /// The `id` query parameter is absent or empty.
    #[error("device 'id' is missing")]
    MissingId,

    #[error("couldn't get the sensor data for device {device_id} from the store: {source}")]
    ReadFailed {
        device_id: String,
        source: StoreError,
    },

    #[error("error saving the sensor data for device {device_id} in the store: {source}")]
    WriteFailed {
        device_id: String,
        source: StoreError,
    },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::WriteFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Bind(_)
            | ApiError::Validation(_)
            | ApiError::MissingId
            | ApiError::ReadFailed { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
