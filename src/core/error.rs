//! Error types for the rate adapter and the history storage.

use thiserror::Error;

/// Failure to retrieve a rate snapshot from the remote service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0} for base currency: {1}")]
    Request(String, String),

    #[error("HTTP error: {0} for base currency: {1}")]
    Status(reqwest::StatusCode, String),

    #[error("Failed to parse rates response for {base}: {reason}")]
    Parse { base: String, reason: String },

    #[error("No rates returned for base currency: {0}")]
    Empty(String),
}

/// Failure of the durable key-value storage. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open storage at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Storage read failed: {0}")]
    Read(String),

    #[error("Storage write failed: {0}")]
    Write(String),
}

