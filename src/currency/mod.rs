//! Exchange rates for quoting estimates outside USD.

pub mod converter;
pub mod provider;
pub mod store;

pub use converter::{fallback_rates, Currency, CurrencyConverter, RateQuote, DEFAULT_RATE_TTL};
pub use provider::{HttpRateProvider, RateFetchError, RateProvider};
pub use store::{CurrencyEntry, MokaRateStore, RateCache, RateStore};
