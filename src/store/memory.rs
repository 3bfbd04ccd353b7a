use crate::core::error::StorageError;
use crate::core::storage::KeyValueCollection;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory collection, lost when the process exits.
#[derive(Default)]
pub struct MemoryCollection {
    inner: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let inner = self.inner.lock().await;
        let value = inner.get(key).cloned();
        debug!(
            "Memory GET for key: {} ({})",
            key,
            if value.is_some() { "hit" } else { "miss" }
        );
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        debug!("Memory PUT for key: {}", key);
        inner.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner.remove(key);
        debug!("Memory REMOVE for key: {}", key);
        Ok(())
    }
}
