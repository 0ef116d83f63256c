use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KvBackend;

/// In-memory byte store keyed by device id.
///
/// Wrapped in `Arc` so it can be cheaply cloned and shared across tasks.
/// Uses `tokio::sync::RwLock` so concurrent readers never block each other.
/// Values go through the same JSON encoding as the Redis backend.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.inner.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_backend_returns_nothing() {
        let backend = MemoryBackend::new();
        assert!(backend.get("dev1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_and_get_round_trip() {
        let backend = MemoryBackend::new();
        backend.set("dev1", b"payload".to_vec()).await.unwrap();

        let got = backend.get("dev1").await.unwrap();
        assert_eq!(got.as_deref(), Some(b"payload".as_slice()));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let backend = MemoryBackend::new();
        backend.set("dev1", b"old".to_vec()).await.unwrap();
        backend.set("dev1", b"new".to_vec()).await.unwrap();

        let got = backend.get("dev1").await.unwrap();
        assert_eq!(got.as_deref(), Some(b"new".as_slice()));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let backend = MemoryBackend::new();
        backend.set("dev1", b"one".to_vec()).await.unwrap();
        backend.set("dev2", b"two".to_vec()).await.unwrap();

        assert_eq!(backend.get("dev1").await.unwrap().as_deref(), Some(b"one".as_slice()));
        assert_eq!(backend.get("dev2").await.unwrap().as_deref(), Some(b"two".as_slice()));
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();

        backend.set("dev1", b"shared".to_vec()).await.unwrap();

        // Clone sees the same data
        let got = clone.get("dev1").await.unwrap();
        assert_eq!(got.as_deref(), Some(b"shared".as_slice()));
    }
}
