//! Live exchange-rate source.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Failure to obtain a usable live rate set. Always recovered by the
/// converter.
#[derive(Debug, thiserror::Error)]
pub enum RateFetchError {
    #[error("Exchange rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Exchange rate endpoint returned {0}")]
    Status(StatusCode),

    #[error("Malformed exchange rate payload: {0}")]
    Malformed(String),
}

/// Source of USD-based exchange rates (currency code -> units per USD).
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_usd_rates(&self) -> Result<HashMap<String, f64>, RateFetchError>;
}

/// Expected shape of the endpoint's JSON body
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Fetches rates with a single GET to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    url: String,
}

impl HttpRateProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RateFetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_usd_rates(&self) -> Result<HashMap<String, f64>, RateFetchError> {
        tracing::debug!("Fetching exchange rates from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(RateFetchError::Status(response.status()));
        }

        let parsed: LatestRatesResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                RateFetchError::Malformed(e.to_string())
            } else {
                RateFetchError::Http(e)
            }
        })?;

        Ok(parsed.rates)
    }
}
