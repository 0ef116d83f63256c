use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single reading reported by a sensor device.
///
/// The JSON field names below are the external contract: requests bind to
/// this structure, responses serialize from it, and the stored value under
/// `device_id` is exactly this structure as UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorReading {
    /// Timestamp of the reading. Opaque: stored as-is, never parsed.
    pub time: String,
    /// Unique identifier for the device; doubles as the storage key.
    pub device_id: String,
    /// Device type discriminator, `"A"` or `"B"`.
    pub device_type: String,
    /// Uptime of the device in seconds.
    pub uptime: i64,
    /// Temperature recorded by the sensor, in degrees Celsius.
    pub temp: f64,
}

/// Rejection produced by `SensorReading::validate` for a `device_type`
/// outside the supported set. The message carries the offending value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("device type {0} is not supported")]
pub struct UnsupportedDeviceType(pub String);

impl SensorReading {
    /// Device types the service accepts.
    pub const SUPPORTED_DEVICE_TYPES: [&'static str; 2] = ["A", "B"];

    /// A reading is valid iff `device_type` is one of
    /// `SUPPORTED_DEVICE_TYPES`. No other field is validated.
    pub fn validate(&self) -> Result<(), UnsupportedDeviceType> {
        if Self::SUPPORTED_DEVICE_TYPES.contains(&self.device_type.as_str()) {
            Ok(())
        } else {
            Err(UnsupportedDeviceType(self.device_type.clone()))
        }
    }
}
