//! Key-value storage abstractions

use crate::core::error::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

/// A named collection of byte values, durable or in-memory.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Hands out collections by name.
pub trait Store: Send + Sync {
    fn get_collection(&self, name: &str) -> Result<Arc<dyn KeyValueCollection>, StorageError>;
}
