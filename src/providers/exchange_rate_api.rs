use super::util::with_retry;
use crate::core::error::FetchError;
use crate::core::rates::{RateProvider, RateSnapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const RETRIES: usize = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Fetches `latest` rate tables from an exchangerate-api.com compatible
/// service.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateSnapshot, FetchError> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting rates from {}", url);

        let send = || async { self.client.get(&url).send().await };
        let response = with_retry(send, RETRIES, RETRY_DELAY)
            .await
            .map_err(|e| FetchError::Request(e.to_string(), base.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status(), base.to_string()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string(), base.to_string()))?;

        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Parse {
                base: base.to_string(),
                reason: e.to_string(),
            })?;

        if data.rates.is_empty() {
            return Err(FetchError::Empty(base.to_string()));
        }

        let invalid: Vec<&str> = data
            .rates
            .iter()
            .filter(|(_, rate)| !(rate.is_finite() && **rate > 0.0))
            .map(|(code, _)| code.as_str())
            .collect();
        if !invalid.is_empty() {
            warn!(codes = ?invalid, "Dropping non-positive rates");
        }

        let snapshot = RateSnapshot::new(base, data.rates);
        debug!("Fetched {} rates", snapshot.len());
        Ok(snapshot)
    }
}
