//! HTML routes

pub mod estimator;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(estimator::form))
        .route("/estimate", post(estimator::submit))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}
