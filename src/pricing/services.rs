//! Pricing service: validation, rate lookup and conversion around the
//! pure calculators.

use std::sync::Arc;

use tracing::debug;

use crate::currency::{Currency, CurrencyConverter};

use super::calculators::calculate_trip_cost;
use super::catalog::RateCatalog;
use super::models::{CostResult, Estimate, TripRequest};
use super::season::SeasonPolicy;

/// Pricing validation error types. Any of these aborts the estimate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid tier: {message}")]
    InvalidTier { message: String },

    #[error("Invalid season: {message}")]
    InvalidSeason { message: String },

    #[error("Invalid currency: {message}")]
    InvalidCurrency { message: String },
}

impl PricingError {
    /// Stable tag used in API error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::InvalidTier { .. } => "invalid_tier",
            PricingError::InvalidSeason { .. } => "invalid_season",
            PricingError::InvalidCurrency { .. } => "invalid_currency",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PricingError::InvalidInput { message }
            | PricingError::InvalidTier { message }
            | PricingError::InvalidSeason { message }
            | PricingError::InvalidCurrency { message } => message,
        }
    }
}

/// Combines the rate catalog, season policy and currency converter.
#[derive(Clone)]
pub struct PricingEngine {
    catalog: Arc<RateCatalog>,
    seasons: SeasonPolicy,
    converter: Arc<CurrencyConverter>,
}

impl PricingEngine {
    pub fn new(catalog: Arc<RateCatalog>, converter: Arc<CurrencyConverter>) -> Self {
        Self {
            catalog,
            seasons: SeasonPolicy,
            converter,
        }
    }

    pub fn seasons(&self) -> &SeasonPolicy {
        &self.seasons
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// Estimate the cost of a trip.
    ///
    /// Validation happens before any arithmetic or rate fetch. A failed
    /// fetch does not fail the estimate: the fallback rate is used and a
    /// warning is returned in `Estimate::warnings`.
    pub async fn estimate(&self, request: &TripRequest) -> Result<Estimate, PricingError> {
        if request.travelers == 0 {
            return Err(PricingError::InvalidInput {
                message: "Travelers must be at least 1".to_string(),
            });
        }
        if request.days == 0 {
            return Err(PricingError::InvalidInput {
                message: "Days must be at least 1".to_string(),
            });
        }

        let row = self.catalog.lookup(request.visitor_type, request.budget_tier)?;
        let currency = Currency::parse_code(&request.currency_code)?;

        let season = self.seasons.resolve(request.season);
        let multiplier = self.seasons.entry(season).multiplier;

        let quote = self.converter.quote(currency).await;

        let cost = calculate_trip_cost(
            row,
            request.days,
            request.travelers,
            multiplier,
            quote.entry.rate,
        );

        debug!(
            visitor_type = request.visitor_type.as_str(),
            budget_tier = request.budget_tier.as_str(),
            season = season.as_str(),
            currency = currency.code(),
            total = cost.total,
            "Estimate computed"
        );

        Ok(Estimate {
            result: CostResult {
                total_cost: cost.total,
                breakdown: cost.breakdown,
                season_adjustment: cost.season_adjustment,
                currency_symbol: quote.entry.symbol,
                currency_code: currency.code().to_string(),
                season,
            },
            rate_source: quote.source,
            warnings: quote.warning.into_iter().collect(),
        })
    }
}
