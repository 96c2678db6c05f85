//! Static rate tables.
//!
//! Business data: USD per day, per person. Built once at startup and shared
//! read-only through `Arc`.

use std::collections::HashMap;

use super::models::{BudgetTier, RateRow, VisitorType};
use super::services::PricingError;

/// Rates keyed by (visitor type, budget tier)
#[derive(Debug, Clone)]
pub struct RateCatalog {
    rows: HashMap<(VisitorType, BudgetTier), RateRow>,
}

impl RateCatalog {
    /// The published safari rate card.
    pub fn standard() -> Self {
        use BudgetTier::*;
        use VisitorType::*;

        let rows = HashMap::from([
            ((International, Budget), RateRow::new(120.0, 70.0, 35.0, 15.0)),
            ((International, MidRange), RateRow::new(300.0, 180.0, 70.0, 50.0)),
            ((International, Luxury), RateRow::new(600.0, 420.0, 120.0, 60.0)),
            ((Resident, Budget), RateRow::new(70.0, 40.0, 20.0, 10.0)),
            ((Resident, MidRange), RateRow::new(180.0, 110.0, 40.0, 30.0)),
            ((Resident, Luxury), RateRow::new(400.0, 290.0, 70.0, 40.0)),
        ]);

        Self { rows }
    }

    /// Build a catalog from explicit rows (partial tables are allowed).
    pub fn from_rows(rows: impl IntoIterator<Item = ((VisitorType, BudgetTier), RateRow)>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn lookup(
        &self,
        visitor_type: VisitorType,
        budget_tier: BudgetTier,
    ) -> Result<&RateRow, PricingError> {
        self.rows
            .get(&(visitor_type, budget_tier))
            .ok_or_else(|| PricingError::InvalidTier {
                message: format!(
                    "No rates for {} visitors at the {} tier",
                    visitor_type.as_str(),
                    budget_tier.as_str()
                ),
            })
    }
}

impl Default for RateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
