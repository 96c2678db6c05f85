//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use crate::currency::RateQuote;

use super::models::{Breakdown, Estimate, RateSource, Season};
use super::services::PricingError;

/// Response for a trip estimate
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub total_cost: f64,
    pub breakdown: Breakdown,
    pub season_adjustment: f64,
    pub currency_symbol: String,
    pub currency_code: String,
    pub season: Season,
    pub rate_source: RateSource,
    pub warnings: Vec<String>,
}

impl From<Estimate> for EstimateResponse {
    fn from(estimate: Estimate) -> Self {
        let result = estimate.result;
        Self {
            total_cost: result.total_cost,
            breakdown: result.breakdown,
            season_adjustment: result.season_adjustment,
            currency_symbol: result.currency_symbol,
            currency_code: result.currency_code,
            season: result.season,
            rate_source: estimate.rate_source,
            warnings: estimate.warnings,
        }
    }
}

/// Response for a currency quote
#[derive(Debug, Serialize)]
pub struct RateQuoteResponse {
    pub currency_code: String,
    pub rate: f64,
    pub symbol: String,
    pub rate_source: RateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<RateQuote> for RateQuoteResponse {
    fn from(quote: RateQuote) -> Self {
        Self {
            currency_code: quote.currency.code().to_string(),
            rate: quote.entry.rate,
            symbol: quote.entry.symbol,
            rate_source: quote.source,
            warning: quote.warning,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.error_type().to_string(),
            message: err.message().to_string(),
        }
    }
}
