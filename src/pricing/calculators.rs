//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no network or cache access.
//! All arithmetic is f64 and nothing is rounded here; display rounding is
//! the presenter's job.

use super::models::{Breakdown, RateRow};

/// Trip cost in a single currency, before it is labelled for display
#[derive(Debug, Clone, PartialEq)]
pub struct TripCost {
    pub total: f64,
    pub breakdown: Breakdown,
    pub season_adjustment: f64,
}

/// Scale a per-day, per-person row to the whole party for the whole trip.
pub fn base_cost(row: &RateRow, days: u32, travelers: u32) -> (f64, Breakdown) {
    let days = f64::from(days);
    let travelers = f64::from(travelers);

    let total = row.total_per_day_per_person * days * travelers;
    let breakdown = row
        .breakdown
        .iter()
        .map(|(category, amount)| (*category, amount * days * travelers))
        .collect();

    (total, breakdown)
}

/// Calculate the trip cost for a rate row.
///
/// # Arguments
/// * `row` - Daily per-person USD rates
/// * `days` - Trip length, at least 1
/// * `travelers` - Party size, at least 1
/// * `season_multiplier` - Discount factor in (0, 1]
/// * `currency_rate` - USD to target currency
///
/// # Returns
/// `TripCost` in the target currency. `season_adjustment` is the amount
/// saved against the undiscounted price.
pub fn calculate_trip_cost(
    row: &RateRow,
    days: u32,
    travelers: u32,
    season_multiplier: f64,
    currency_rate: f64,
) -> TripCost {
    let (base_total, base_breakdown) = base_cost(row, days, travelers);

    let adjusted_total = base_total * season_multiplier;
    let season_adjustment = base_total * (1.0 - season_multiplier);

    let breakdown = base_breakdown
        .into_iter()
        .map(|(category, amount)| (category, amount * season_multiplier * currency_rate))
        .collect();

    TripCost {
        total: adjusted_total * currency_rate,
        breakdown,
        season_adjustment: season_adjustment * currency_rate,
    }
}
