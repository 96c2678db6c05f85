//! JSON API for the pricing engine.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

use crate::AppState;

use super::requests::{EstimateRequest, RateQuery};
use super::responses::{EstimateResponse, PricingErrorResponse, RateQuoteResponse};
use super::services::PricingError;

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected pricing request: {}", self);
        (StatusCode::BAD_REQUEST, Json(PricingErrorResponse::from(&self))).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/estimate", post(estimate))
        .route("/api/pricing/rates", get(rate_quote))
        .route("/api/pricing/rates/cache", delete(clear_rate_cache))
}

impl From<JsonRejection> for PricingError {
    fn from(rejection: JsonRejection) -> Self {
        PricingError::InvalidInput {
            message: rejection.body_text(),
        }
    }
}

/// Estimate a trip
async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, PricingError> {
    let Json(request) = payload?;
    let trip = request.into_trip_request()?;
    let estimate = state.engine.estimate(&trip).await?;
    Ok(Json(estimate.into()))
}

/// Current conversion rate for one currency
async fn rate_quote(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<RateQuoteResponse>, PricingError> {
    let quote = state.engine.converter().rate_for(&query.currency).await?;
    Ok(Json(quote.into()))
}

/// Drop cached exchange rates
async fn clear_rate_cache(State(state): State<AppState>) -> StatusCode {
    state.engine.converter().invalidate().await;
    StatusCode::NO_CONTENT
}
