pub mod disk;
pub mod history;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::error::StorageError;
use crate::core::storage::{KeyValueCollection, Store};
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};
use tracing::{debug, warn};

/// A key-value store that can hold multiple collections, backed by a fjall
/// keyspace or by memory only.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Keyspace>,
}

impl KeyValueStore {
    /// Opens a durable store rooted at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let keyspace = fjall::Config::new(path)
            .open()
            .map_err(|e| StorageError::Open {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!("Opened store at {}", path.display());

        Ok(Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: Some(keyspace),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: None,
        }
    }

    /// Opens the store under the configured data path. Falls back to memory
    /// when the directory can't be used, so history is kept for this run only.
    pub fn from_config(config: &AppConfig) -> Self {
        let opened = config
            .default_data_path()
            .map_err(|e| StorageError::Open {
                path: "<data dir>".to_string(),
                reason: e.to_string(),
            })
            .and_then(|path| Self::open(&path.join("store")));

        match opened {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Falling back to in-memory storage");
                Self::in_memory()
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.keyspace.is_some()
    }
}

impl Store for KeyValueStore {
    fn get_collection(&self, name: &str) -> Result<Arc<dyn KeyValueCollection>, StorageError> {
        if let Some(collection) = self
            .collections
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
        {
            return Ok(Arc::clone(collection));
        }

        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        if let Some(collection) = collections.get(name) {
            return Ok(Arc::clone(collection));
        }

        let collection: Arc<dyn KeyValueCollection> = match &self.keyspace {
            Some(keyspace) => {
                let partition = keyspace
                    .open_partition(name, PartitionCreateOptions::default())
                    .map_err(|e| StorageError::Open {
                        path: name.to_string(),
                        reason: e.to_string(),
                    })?;
                Arc::new(DiskCollection::new(keyspace.clone(), partition))
            }
            None => Arc::new(MemoryCollection::new()),
        };
        collections.insert(name.to_string(), Arc::clone(&collection));
        Ok(collection)
    }
}
