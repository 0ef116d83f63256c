//! Sensor data service: accepts readings from devices over HTTP and
//! persists them in a key-value store, keyed by device id.

pub mod api;
pub mod config;
pub mod store;
