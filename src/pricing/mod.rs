//! Pricing engine module for safari estimates.
//!
//! Turns a trip request into a total and per-category breakdown, applying
//! the season discount and currency conversion.

pub mod calculators;
pub mod catalog;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod season;
pub mod services;

// Re-export commonly used items
pub use calculators::calculate_trip_cost;
pub use catalog::RateCatalog;
pub use models::{
    BudgetTier, Category, CostResult, Estimate, RateRow, RateSource, Season, TripRequest,
    VisitorType,
};
pub use routes::router;
pub use season::SeasonPolicy;
pub use services::{PricingEngine, PricingError};
