//! Safari trip cost estimator.
//!
//! A pricing engine (rate catalog, season discounts, cached currency
//! conversion) behind a small axum web front.

pub mod config;
pub mod currency;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::currency::{CurrencyConverter, HttpRateProvider, MokaRateStore, RateFetchError};
use crate::pricing::{PricingEngine, RateCatalog};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: PricingEngine,
}

impl AppState {
    pub fn new(engine: PricingEngine) -> Self {
        Self { engine }
    }

    /// Standard catalog, moka rate store and HTTP rate provider.
    pub fn from_config(config: &Config) -> Result<Self, RateFetchError> {
        let provider = HttpRateProvider::new(config.rates_url.clone(), config.rates_timeout)?;
        let converter = CurrencyConverter::new(
            Arc::new(MokaRateStore::new()),
            Arc::new(provider),
            config.rates_ttl,
        );
        let engine = PricingEngine::new(Arc::new(RateCatalog::standard()), Arc::new(converter));
        Ok(Self::new(engine))
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
