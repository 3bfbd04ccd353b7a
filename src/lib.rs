pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::rates::RateProvider;
use crate::core::session::Session;
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use crate::store::history::HistoryStore;
use crate::store::memory::MemoryCollection;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub enum AppCommand {
    Rates,
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
        swap: bool,
    },
    History,
    Clear,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let kv_store = store::KeyValueStore::from_config(&config);
    let history_store = HistoryStore::from_store(&kv_store).unwrap_or_else(|e| {
        warn!(error = %e, "History storage unavailable, keeping history in memory");
        HistoryStore::new(Arc::new(MemoryCollection::new()))
    });

    let provider: Arc<dyn RateProvider> = Arc::new(ExchangeRateApiProvider::new(
        config.exchange_rate_base_url(),
        Duration::from_secs(config.request_timeout_secs),
    )?);

    match command {
        AppCommand::Rates => {
            let session = cli::start_session(provider, history_store).await?;
            cli::rates::run(&session)
        }
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let pair = cli::convert::resolve_pair(from.as_deref(), to.as_deref(), swap, &config)?;
            let mut session = cli::start_session(provider, history_store).await?;
            cli::convert::run(&mut session, &amount, &pair, &config.date_format).await?;
            Ok(())
        }
        AppCommand::History => {
            let session = Session::new(provider, history_store).await;
            cli::history::run(&session)
        }
        AppCommand::Clear => {
            let mut session = Session::new(provider, history_store).await;
            cli::history::clear(&mut session).await
        }
    }
}
