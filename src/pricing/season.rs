//! Season discount policy.

use super::models::Season;

/// Multiplier and display label for a season
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonEntry {
    pub multiplier: f64,
    pub label: &'static str,
}

/// Maps seasons to discount factors. Every multiplier is in (0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonPolicy;

impl SeasonPolicy {
    /// Season assumed when the request does not name one.
    pub const DEFAULT: Season = Season::High;

    pub fn entry(&self, season: Season) -> SeasonEntry {
        match season {
            Season::High => SeasonEntry {
                multiplier: 1.0,
                label: "High Season",
            },
            Season::Shoulder => SeasonEntry {
                multiplier: 0.9,
                label: "Shoulder Season",
            },
            Season::Low => SeasonEntry {
                multiplier: 0.7,
                label: "Low Season",
            },
        }
    }

    /// Resolve an optional season to the one actually applied.
    pub fn resolve(&self, season: Option<Season>) -> Season {
        season.unwrap_or(Self::DEFAULT)
    }

    pub fn multiplier_for(&self, season: Option<Season>) -> f64 {
        self.entry(self.resolve(season)).multiplier
    }
}
