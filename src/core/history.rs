//! Conversion history records and the bounded newest-first log.

use crate::core::conversion::{Conversion, parse_amount};
use crate::core::currency::CurrencyPair;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};
use tracing::warn;
use uuid::Uuid;

/// Maximum number of conversions kept in the history.
pub const MAX_HISTORY_ENTRIES: usize = 10;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Whether `date_format` is a strftime pattern chrono can render.
pub fn is_valid_date_format(date_format: &str) -> bool {
    !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error))
}

fn format_today(date_format: &str) -> String {
    let now = Local::now();
    let mut date = String::new();
    if write!(date, "{}", now.format(date_format)).is_err() {
        warn!(date_format, "Invalid date format, using {}", DEFAULT_DATE_FORMAT);
        return now.format(DEFAULT_DATE_FORMAT).to_string();
    }
    date
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: String,
    pub amount: String,
    pub from: String,
    pub to: String,
    pub result: String,
    pub date: String,
}

impl ConversionRecord {
    /// Creates a record for a conversion the user has just seen. Returns
    /// `None` unless the conversion is a computed, non-zero value.
    ///
    /// `result` is the displayed string of `conversion`, so the stored value
    /// can't drift from what was shown.
    pub fn new(
        amount: &str,
        pair: &CurrencyPair,
        conversion: &Conversion,
        date_format: &str,
    ) -> Option<Self> {
        if !conversion.is_recordable() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            amount: amount.trim().to_string(),
            from: pair.from.code.clone(),
            to: pair.to.code.clone(),
            result: conversion.to_string(),
            date: format_today(date_format),
        })
    }

    /// Whether the stored result is a positive number, i.e. neither the
    /// zero-display nor the error-display value.
    pub fn has_valid_result(&self) -> bool {
        parse_amount(&self.result).is_some()
    }
}

impl Display for ConversionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            self.amount, self.from, self.result, self.to
        )
    }
}

/// Newest-first list of past conversions, never longer than
/// [`MAX_HISTORY_ENTRIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<ConversionRecord>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from stored entries, keeping the first
    /// [`MAX_HISTORY_ENTRIES`].
    pub fn from_entries(mut entries: Vec<ConversionRecord>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self(entries)
    }

    /// Returns a new history with `record` at the front and the oldest
    /// entries evicted.
    pub fn with_record(&self, record: ConversionRecord) -> Self {
        let mut entries = Vec::with_capacity(MAX_HISTORY_ENTRIES);
        entries.push(record);
        entries.extend(self.0.iter().take(MAX_HISTORY_ENTRIES - 1).cloned());
        Self(entries)
    }

    pub fn entries(&self) -> &[ConversionRecord] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
