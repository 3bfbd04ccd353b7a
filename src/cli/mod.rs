pub mod convert;
pub mod history;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::rates::RateProvider;
use crate::core::session::Session;
use crate::store::history::HistoryStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Starts a session with a spinner while the first rates are fetched.
pub async fn start_session(
    provider: Arc<dyn RateProvider>,
    store: HistoryStore,
) -> Result<Session> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let session = Session::start(provider, store).await;
    spinner.finish_and_clear();
    session.context("Failed to load exchange rates. Check your connection.")
}
