//! State owned by a front-end: the current rate snapshot and the history.
//!
//! Conversion itself stays a pure function; the session only supplies the
//! rates and routes qualifying results to the history store.

use crate::core::conversion::{Conversion, convert_with};
use crate::core::currency::{Currency, currencies_for};
use crate::core::error::FetchError;
use crate::core::history::{ConversionRecord, History};
use crate::core::rates::{BASE_CURRENCY, RateProvider, RateSnapshot};
use crate::store::history::HistoryStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Session {
    provider: Arc<dyn RateProvider>,
    store: HistoryStore,
    rates: Option<RateSnapshot>,
    history: History,
}

impl Session {
    /// Creates a session without rates. Call [`Session::refresh_rates`]
    /// before converting.
    pub async fn new(provider: Arc<dyn RateProvider>, store: HistoryStore) -> Self {
        let history = store.load().await;
        Self {
            provider,
            store,
            rates: None,
            history,
        }
    }

    /// Loads the history and fetches the first snapshot. Without a snapshot
    /// nothing can be converted, so a fetch failure is returned.
    pub async fn start(
        provider: Arc<dyn RateProvider>,
        store: HistoryStore,
    ) -> Result<Self, FetchError> {
        let mut session = Self::new(provider, store).await;
        session.refresh_rates().await?;
        Ok(session)
    }

    pub fn rates(&self) -> Option<&RateSnapshot> {
        self.rates.as_ref()
    }

    /// Replaces the snapshot with a freshly fetched one. On failure the
    /// previous snapshot, if any, stays in place.
    pub async fn refresh_rates(&mut self) -> Result<&RateSnapshot, FetchError> {
        match self.provider.fetch_rates(BASE_CURRENCY).await {
            Ok(snapshot) => {
                info!(
                    "Rates updated at {} ({} currencies)",
                    snapshot.fetched_at_display(),
                    snapshot.len()
                );
                Ok(&*self.rates.insert(snapshot))
            }
            Err(e) => {
                if self.rates.is_some() {
                    warn!(error = %e, "Refresh failed, keeping previous rates");
                }
                Err(e)
            }
        }
    }

    /// Currencies available in the current snapshot.
    pub fn currencies(&self) -> Vec<Currency> {
        self.rates.as_ref().map(currencies_for).unwrap_or_default()
    }

    /// Converts `amount` between two codes. Without a snapshot every
    /// conversion is unavailable.
    pub fn convert(&self, amount: &str, from: &str, to: &str) -> Conversion {
        match &self.rates {
            Some(snapshot) => convert_with(snapshot, amount, from, to),
            None => Conversion::Unavailable,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Appends `record` to the history and persists it. Returns whether the
    /// record was accepted.
    pub async fn record_conversion(&mut self, record: ConversionRecord) -> bool {
        let before = self.history.len();
        let first_id = record.id.clone();
        self.history = self.store.append(record, &self.history).await;

        let accepted = self
            .history
            .entries()
            .first()
            .is_some_and(|r| r.id == first_id);
        debug!(accepted, before, after = self.history.len(), "Recorded conversion");
        accepted
    }

    /// Empties the history in memory and in storage.
    pub async fn clear_history(&mut self) {
        self.history = self.store.clear().await;
    }
}
