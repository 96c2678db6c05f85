//! Domain types for the pricing engine.
//!
//! Plain data only: parsing from wire strings lives here so that every
//! caller (JSON API, HTML form) rejects unknown values the same way.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::services::PricingError;

/// Who is travelling; each visitor type has its own rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorType {
    International,
    Resident,
}

impl VisitorType {
    pub const ALL: [VisitorType; 2] = [VisitorType::International, VisitorType::Resident];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorType::International => "international",
            VisitorType::Resident => "resident",
        }
    }
}

impl FromStr for VisitorType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "international" => Ok(VisitorType::International),
            "resident" => Ok(VisitorType::Resident),
            other => Err(PricingError::InvalidTier {
                message: format!("Unknown visitor type '{}'", other),
            }),
        }
    }
}

/// Daily spend level selecting a rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::MidRange, BudgetTier::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::MidRange => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }
}

impl FromStr for BudgetTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(BudgetTier::Budget),
            "mid-range" => Ok(BudgetTier::MidRange),
            "luxury" => Ok(BudgetTier::Luxury),
            "" => Err(PricingError::InvalidTier {
                message: "Please select a budget level".to_string(),
            }),
            other => Err(PricingError::InvalidTier {
                message: format!("Unknown budget tier '{}'", other),
            }),
        }
    }
}

/// Travel season; drives the discount multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    High,
    Shoulder,
    Low,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::High, Season::Shoulder, Season::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::High => "high",
            Season::Shoulder => "shoulder",
            Season::Low => "low",
        }
    }

    /// Parse an optional season field. Missing or blank means "not given".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Season>, PricingError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for Season {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Season::High),
            "shoulder" => Ok(Season::Shoulder),
            "low" => Ok(Season::Low),
            other => Err(PricingError::InvalidSeason {
                message: format!("Unknown season '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost sub-component of a daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accom,
    Parks,
    Transport,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Accom, Category::Parks, Category::Transport];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Accom => "Accommodation & Meals",
            Category::Parks => "Park Fees",
            Category::Transport => "Transport",
        }
    }
}

/// Amounts per category, iterated in display order.
pub type Breakdown = BTreeMap<Category, f64>;

/// Per-day, per-person price for one (visitor type, budget tier) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub total_per_day_per_person: f64,
    pub breakdown: Breakdown,
}

impl RateRow {
    pub fn new(total: f64, accom: f64, parks: f64, transport: f64) -> Self {
        Self {
            total_per_day_per_person: total,
            breakdown: BTreeMap::from([
                (Category::Accom, accom),
                (Category::Parks, parks),
                (Category::Transport, transport),
            ]),
        }
    }
}

/// A single estimate request. Validated by the engine, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub travelers: u32,
    pub days: u32,
    pub visitor_type: VisitorType,
    pub budget_tier: BudgetTier,
    /// `None` means the high season default.
    pub season: Option<Season>,
    pub currency_code: String,
}

/// Where the conversion rate for an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Cached,
    Fallback,
}

/// Output of the engine, in the requested currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostResult {
    pub total_cost: f64,
    pub breakdown: Breakdown,
    /// Savings relative to high season, never negative.
    pub season_adjustment: f64,
    pub currency_symbol: String,
    pub currency_code: String,
    pub season: Season,
}

/// Cost result plus the out-of-band conversion signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub result: CostResult,
    pub rate_source: RateSource,
    pub warnings: Vec<String>,
}
