pub mod memory;
pub mod models;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use models::SensorReading;

// ---------------------------------------------------------------------------
// KvBackend
// ---------------------------------------------------------------------------

/// Byte-level key-value backend the typed store sits on.
///
/// Implementations: `RedisBackend` for production, `MemoryBackend` for tests
/// and embedders running without an external store.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Write `value` under `key`, overwriting any previous value.
    /// Entries never expire.
    async fn set(&self, key: &str, value: Vec<u8>) -> anyhow::Result<()>;

    /// Read the value under `key`; `None` if the key is absent.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    /// The key is absent. Distinct from `Storage` so callers can tell
    /// "no data yet" apart from "store unreachable".
    #[error("no sensor data stored for device id {0}")]
    NotFound(String),

    /// Connection, read, or write failure reported by the backend.
    #[error("store request failed: {0}")]
    Storage(#[source] anyhow::Error),

    /// The stored bytes do not decode as a `SensorReading`.
    #[error("stored sensor data for device id {0} is not valid JSON: {1}")]
    Deserialize(String, #[source] serde_json::Error),

    #[error("could not serialize sensor data for device id {0}: {1}")]
    Serialize(String, #[source] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ReadingStore
// ---------------------------------------------------------------------------

/// Typed store for `SensorReading`s, keyed by device id.
///
/// Owns the JSON encoding on both paths; the backend only ever sees bytes.
/// Cheap to clone: all clones share the same backend handle.
#[derive(Clone)]
pub struct ReadingStore {
    backend: Arc<dyn KvBackend>,
}

impl ReadingStore {
    pub fn new<B: KvBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Serialize `reading` and write it under `device_id`, overwriting any
    /// previous reading for that device.
    pub async fn put(&self, device_id: &str, reading: &SensorReading) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(reading)
            .map_err(|e| StoreError::Serialize(device_id.to_owned(), e))?;
        let len = bytes.len();

        self.backend
            .set(device_id, bytes)
            .await
            .map_err(StoreError::Storage)?;

        debug!(device_id = %device_id, bytes = len, "Sensor reading stored");
        Ok(())
    }

    /// Read and decode the reading stored under `device_id`.
    pub async fn get(&self, device_id: &str) -> Result<SensorReading, StoreError> {
        let bytes = self
            .backend
            .get(device_id)
            .await
            .map_err(StoreError::Storage)?
            .ok_or_else(|| StoreError::NotFound(device_id.to_owned()))?;

        debug!(device_id = %device_id, bytes = bytes.len(), "Sensor reading fetched");
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Deserialize(device_id.to_owned(), e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::memory::MemoryBackend;
    use super::*;

    fn reading(device_id: &str, temp: f64) -> SensorReading {
        SensorReading {
            time: "2025-01-01T10:00:00Z".to_owned(),
            device_id: device_id.to_owned(),
            device_type: "A".to_owned(),
            uptime: 123,
            temp,
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = ReadingStore::new(MemoryBackend::new());
        let r = reading("dev1", 23.5);

        store.put("dev1", &r).await.unwrap();
        let got = store.get("dev1").await.unwrap();
        assert_eq!(got, r);
    }

    #[tokio::test]
    async fn get_absent_device_is_not_found() {
        let store = ReadingStore::new(MemoryBackend::new());
        match store.get("ghost").await {
            Err(StoreError::NotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn put_overwrites_previous_reading() {
        let store = ReadingStore::new(MemoryBackend::new());
        store.put("dev1", &reading("dev1", 20.0)).await.unwrap();
        store.put("dev1", &reading("dev1", 25.5)).await.unwrap();

        let got = store.get("dev1").await.unwrap();
        assert_eq!(got.temp, 25.5);
    }

    #[tokio::test]
    async fn stored_value_is_plain_json() {
        let backend = MemoryBackend::new();
        let store = ReadingStore::new(backend.clone());
        store.put("dev1", &reading("dev1", 23.5)).await.unwrap();

        let bytes = backend.get("dev1").await.unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["device_id"], "dev1");
        assert_eq!(v["device_type"], "A");
        assert_eq!(v["temp"], 23.5);
    }

    #[tokio::test]
    async fn corrupt_stored_value_is_deserialize_error() {
        let backend = MemoryBackend::new();
        backend.set("dev1", b"{ not json".to_vec()).await.unwrap();

        let store = ReadingStore::new(backend);
        match store.get("dev1").await {
            Err(StoreError::Deserialize(id, _)) => assert_eq!(id, "dev1"),
            other => panic!("expected Deserialize, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn device_ids_are_independent_keys() {
        let store = ReadingStore::new(MemoryBackend::new());
        store.put("dev1", &reading("dev1", 20.0)).await.unwrap();
        store.put("dev2", &reading("dev2", 30.0)).await.unwrap();

        assert_eq!(store.get("dev1").await.unwrap().temp, 20.0);
        assert_eq!(store.get("dev2").await.unwrap().temp, 30.0);
    }
}
