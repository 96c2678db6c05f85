//! Exchange-rate cache storage.
//!
//! The converter only sees the `RateStore` trait; the moka-backed store is
//! what the server wires in.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed key of the single cached rate set
pub const RATE_CACHE_KEY: &str = "safari_exchange_rates";

/// Conversion rate from USD and the symbol to display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub rate: f64,
    pub symbol: String,
}

/// A fetched rate set and when it was fetched (epoch millis)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCache {
    pub data: HashMap<String, CurrencyEntry>,
    pub timestamp: i64,
}

impl RateCache {
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_millis.saturating_sub(self.timestamp) < ttl_millis
    }
}

/// Storage for the cached rate set.
#[async_trait]
pub trait RateStore: Send + Sync {
    async fn get(&self) -> Option<RateCache>;
    async fn set(&self, rates: RateCache);
    async fn clear(&self);
}

/// In-process store on top of moka.
///
/// No TTL is configured on the moka cache: staleness is decided by the
/// converter from the entry timestamp.
#[derive(Clone)]
pub struct MokaRateStore {
    entries: Cache<String, Arc<RateCache>>,
}

impl MokaRateStore {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().max_capacity(1).build(),
        }
    }
}

impl Default for MokaRateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateStore for MokaRateStore {
    async fn get(&self) -> Option<RateCache> {
        let hit = self.entries.get(RATE_CACHE_KEY).await;
        debug!("Rate cache {}", if hit.is_some() { "HIT" } else { "MISS" });
        hit.map(|rates| (*rates).clone())
    }

    async fn set(&self, rates: RateCache) {
        self.entries
            .insert(RATE_CACHE_KEY.to_string(), Arc::new(rates))
            .await;
    }

    async fn clear(&self) {
        self.entries.invalidate(RATE_CACHE_KEY).await;
    }
}
