use crate::core::error::StorageError;
use crate::core::storage::KeyValueCollection;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use tracing::debug;

/// A fjall partition. Every write is synced to disk before returning, and
/// all I/O runs on the blocking pool.
pub struct DiskCollection {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(keyspace: Keyspace, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
        }
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let partition = self.partition.clone();
        let key = key.to_string();
        let value = tokio::task::spawn_blocking(move || {
            let value = partition.get(key.as_bytes())?;
            debug!(
                "Disk GET for key: {} ({})",
                key,
                if value.is_some() { "hit" } else { "miss" }
            );
            Ok::<_, fjall::Error>(value.map(|slice| slice.to_vec()))
        })
        .await
        .map_err(|e| StorageError::Read(e.to_string()))?
        .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let keyspace = self.keyspace.clone();
        let partition = self.partition.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            partition.insert(key.as_bytes(), value)?;
            keyspace.persist(PersistMode::SyncAll)?;
            debug!("Disk PUT for key: {}", key);
            Ok::<_, fjall::Error>(())
        })
        .await
        .map_err(|e| StorageError::Write(e.to_string()))?
        .map_err(|e| StorageError::Write(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let keyspace = self.keyspace.clone();
        let partition = self.partition.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            partition.remove(key.as_bytes())?;
            keyspace.persist(PersistMode::SyncAll)?;
            debug!("Disk REMOVE for key: {}", key);
            Ok::<_, fjall::Error>(())
        })
        .await
        .map_err(|e| StorageError::Write(e.to_string()))?
        .map_err(|e| StorageError::Write(e.to_string()))
    }
}
