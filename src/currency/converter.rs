//! Currency conversion with a time-boxed cache and a static fallback.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::pricing::models::RateSource;
use crate::pricing::PricingError;

use super::provider::{RateFetchError, RateProvider};
use super::store::{CurrencyEntry, RateCache, RateStore};

/// Default staleness window for cached live rates
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(60 * 60);

/// Currencies the estimator can quote in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Kes,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Kes,
        Currency::Zar,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Kes => "KES",
            Currency::Zar => "ZAR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Kes => "KSh",
            Currency::Zar => "R",
        }
    }

    /// Snapshot rate used when live rates are unavailable.
    pub fn fallback_rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 0.92,
            Currency::Gbp => 0.79,
            Currency::Kes => 129.0,
            Currency::Zar => 18.5,
        }
    }

    fn fallback_entry(&self) -> CurrencyEntry {
        CurrencyEntry {
            rate: self.fallback_rate(),
            symbol: self.symbol().to_string(),
        }
    }

    /// Parse a currency field. Blank means USD.
    pub fn parse_code(code: &str) -> Result<Currency, PricingError> {
        if code.trim().is_empty() {
            return Ok(Currency::Usd);
        }
        code.parse()
    }
}

impl FromStr for Currency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| PricingError::InvalidCurrency {
                message: format!("Unsupported currency '{}'", code),
            })
    }
}

/// The static fallback rate table, keyed by currency code
pub fn fallback_rates() -> HashMap<String, CurrencyEntry> {
    Currency::ALL
        .into_iter()
        .map(|c| (c.code().to_string(), c.fallback_entry()))
        .collect()
}

/// Turn a raw live payload into a complete rate set for the allowlist.
///
/// Every non-USD currency must be present with a positive finite rate.
/// USD is pinned to 1.0 whatever the payload says.
pub fn live_rate_set(
    rates: &HashMap<String, f64>,
) -> Result<HashMap<String, CurrencyEntry>, RateFetchError> {
    let mut data = HashMap::with_capacity(Currency::ALL.len());

    for currency in Currency::ALL {
        let rate = if currency == Currency::Usd {
            1.0
        } else {
            match rates.get(currency.code()) {
                Some(rate) if rate.is_finite() && *rate > 0.0 => *rate,
                Some(rate) => {
                    return Err(RateFetchError::Malformed(format!(
                        "invalid rate {} for {}",
                        rate,
                        currency.code()
                    )))
                }
                None => {
                    return Err(RateFetchError::Malformed(format!(
                        "missing rate for {}",
                        currency.code()
                    )))
                }
            }
        };

        data.insert(
            currency.code().to_string(),
            CurrencyEntry {
                rate,
                symbol: currency.symbol().to_string(),
            },
        );
    }

    Ok(data)
}

/// Rate chosen for one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub currency: Currency,
    pub entry: CurrencyEntry,
    pub source: RateSource,
    /// Set when the fallback table was used.
    pub warning: Option<String>,
}

/// Outcome of the most recent refresh, guarded by the refresh lock
#[derive(Debug, Default)]
struct RefreshState {
    last_failure: Option<String>,
}

/// Supplies conversion rates, refreshing the cached live set when stale.
pub struct CurrencyConverter {
    store: Arc<dyn RateStore>,
    provider: Arc<dyn RateProvider>,
    ttl: Duration,
    // Single writer for refreshes
    refresh: Mutex<RefreshState>,
    // Completed fetch attempts
    attempts: AtomicU64,
}

impl CurrencyConverter {
    pub fn new(store: Arc<dyn RateStore>, provider: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        Self {
            store,
            provider,
            ttl,
            refresh: Mutex::new(RefreshState::default()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Conversion rate and symbol for `code`.
    ///
    /// Only an unsupported code is an error; fetch failures are recovered
    /// with the fallback table and reported through `RateQuote::warning`.
    pub async fn rate_for(&self, code: &str) -> Result<RateQuote, PricingError> {
        let currency = Currency::parse_code(code)?;
        Ok(self.quote(currency).await)
    }

    /// Like `rate_for` for an already validated currency.
    pub async fn quote(&self, currency: Currency) -> RateQuote {
        let (data, source, warning) = self.current_rates().await;

        let entry = if currency == Currency::Usd {
            CurrencyEntry {
                rate: 1.0,
                symbol: currency.symbol().to_string(),
            }
        } else {
            data.get(currency.code())
                .cloned()
                .unwrap_or_else(|| currency.fallback_entry())
        };

        RateQuote {
            currency,
            entry,
            source,
            warning,
        }
    }

    /// Drop the cached rate set; the next quote refetches.
    pub async fn invalidate(&self) {
        self.store.clear().await;
        info!("Exchange rate cache cleared");
    }

    async fn current_rates(&self) -> (HashMap<String, CurrencyEntry>, RateSource, Option<String>) {
        if let Some(cached) = self.fresh_cache().await {
            return (cached.data, RateSource::Cached, None);
        }

        let seen = self.attempts.load(Ordering::SeqCst);
        let mut state = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(cached) = self.fresh_cache().await {
            return (cached.data, RateSource::Cached, None);
        }

        // An attempt finished while we waited and failed: reuse its outcome.
        if self.attempts.load(Ordering::SeqCst) != seen {
            if let Some(reason) = &state.last_failure {
                debug!("Reusing failed exchange rate fetch: {}", reason);
                return Self::fallback(reason);
            }
        }

        let fetched = self
            .provider
            .fetch_usd_rates()
            .await
            .and_then(|rates| live_rate_set(&rates));
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match fetched {
            Ok(data) => {
                state.last_failure = None;
                self.store
                    .set(RateCache {
                        data: data.clone(),
                        timestamp: Utc::now().timestamp_millis(),
                    })
                    .await;
                info!("Exchange rates refreshed ({} currencies)", data.len());
                (data, RateSource::Live, None)
            }
            Err(e) => {
                warn!("Using fallback exchange rates: {}", e);
                let reason = e.to_string();
                let outcome = Self::fallback(&reason);
                state.last_failure = Some(reason);
                outcome
            }
        }
    }

    fn fallback(reason: &str) -> (HashMap<String, CurrencyEntry>, RateSource, Option<String>) {
        (
            fallback_rates(),
            RateSource::Fallback,
            Some(format!(
                "Live exchange rates unavailable ({}); using fallback rates",
                reason
            )),
        )
    }

    async fn fresh_cache(&self) -> Option<RateCache> {
        let cached = self.store.get().await?;
        if cached.is_fresh(Utc::now().timestamp_millis(), self.ttl) {
            Some(cached)
        } else {
            debug!("Cached exchange rates are stale");
            None
        }
    }
}
