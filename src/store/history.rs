//! Durable storage of the conversion history.
//!
//! The whole history is kept as one JSON array under [`HISTORY_KEY`]. Storage
//! failures never reach the caller: reads degrade to an empty history, and a
//! failed write only loses the entry being appended.

use crate::core::error::StorageError;
use crate::core::history::{ConversionRecord, History};
use crate::core::storage::{KeyValueCollection, Store};
use std::sync::Arc;
use tracing::{debug, warn};

pub const HISTORY_COLLECTION: &str = "history";
pub const HISTORY_KEY: &str = "conversionHistory";

#[derive(Clone)]
pub struct HistoryStore {
    collection: Arc<dyn KeyValueCollection>,
}

impl HistoryStore {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self { collection }
    }

    pub fn from_store(store: &dyn Store) -> Result<Self, StorageError> {
        Ok(Self::new(store.get_collection(HISTORY_COLLECTION)?))
    }

    /// Reads the persisted history. Missing, unreadable or corrupt data
    /// yields an empty history.
    pub async fn load(&self) -> History {
        let bytes = match self.collection.get(HISTORY_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No stored history");
                return History::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read history");
                return History::new();
            }
        };

        match serde_json::from_slice::<Vec<ConversionRecord>>(&bytes) {
            Ok(entries) => {
                let history = History::from_entries(entries);
                debug!("Loaded {} history entries", history.len());
                history
            }
            Err(e) => {
                warn!(error = %e, "Stored history is corrupt, starting empty");
                History::new()
            }
        }
    }

    /// Prepends `record` to `current`, persists and returns the result.
    ///
    /// Records without a positive numeric result are rejected and `current`
    /// is returned unchanged.
    pub async fn append(&self, record: ConversionRecord, current: &History) -> History {
        if !record.has_valid_result() {
            debug!(result = %record.result, "Rejected history entry without a valid result");
            return current.clone();
        }

        let history = current.with_record(record);
        if let Err(e) = self.persist(&history).await {
            warn!(error = %e, "Failed to save history");
        }
        history
    }

    /// Deletes the persisted history and returns an empty one.
    pub async fn clear(&self) -> History {
        if let Err(e) = self.collection.remove(HISTORY_KEY).await {
            warn!(error = %e, "Failed to delete stored history");
        }
        History::new()
    }

    async fn persist(&self, history: &History) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(history).map_err(|e| StorageError::Write(e.to_string()))?;
        self.collection.put(HISTORY_KEY, bytes).await
    }
}
