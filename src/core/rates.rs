//! Exchange rate snapshots and the provider abstraction

use crate::core::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// All rates are expressed relative to this currency.
pub const BASE_CURRENCY: &str = "USD";

/// One fetched table of rates. Replaced wholesale on refresh, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    base: String,
    rates: HashMap<String, f64>,
    fetched_at: DateTime<Local>,
}

impl RateSnapshot {
    /// Builds a snapshot captured now. The base currency is always present
    /// at 1.0, and entries that are not finite positive numbers are dropped.
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        let mut rates: HashMap<String, f64> = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        rates.insert(base.to_string(), 1.0);

        Self {
            base: base.to_string(),
            rates,
            fetched_at: Local::now(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Capture time formatted for display, e.g. `19/10/2026 14:03:11`.
    pub fn fetched_at_display(&self) -> String {
        self.fetched_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateSnapshot, FetchError>;
}
