//! Core conversion logic and abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod rates;
pub mod session;
pub mod storage;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, convert};
pub use currency::{Currency, CurrencyPair};
pub use error::{FetchError, StorageError};
pub use history::{ConversionRecord, History};
pub use rates::{RateProvider, RateSnapshot};
pub use session::Session;
