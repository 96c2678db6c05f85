//! Request DTOs for pricing API endpoints.

use serde::Deserialize;
use serde_json::Value;

use super::models::{Season, TripRequest};
use super::services::PricingError;

/// Request to estimate a trip (JSON API)
///
/// Counts are taken as raw JSON values and missing text fields default to
/// empty, so a bad body surfaces as a `PricingError` rather than a rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub travelers: Value,
    #[serde(default)]
    pub days: Value,
    #[serde(default)]
    pub visitor_type: String,
    #[serde(default)]
    pub budget_tier: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Estimator form submission (urlencoded)
///
/// Numeric fields arrive as text so that a blank or garbled field becomes
/// `InvalidInput` instead of a generic rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateForm {
    #[serde(default)]
    pub travelers: String,
    #[serde(default)]
    pub days: String,
    #[serde(default)]
    pub visitor_type: String,
    #[serde(default)]
    pub budget_level: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Query for a single currency quote
#[derive(Debug, Clone, Deserialize)]
pub struct RateQuery {
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn positive_count(field: &str, value: i64) -> Result<u32, PricingError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| PricingError::InvalidInput {
            message: format!("{} must be a whole number of at least 1, got {}", field, value),
        })
}

fn json_count(field: &str, value: &Value) -> Result<u32, PricingError> {
    match value.as_i64() {
        Some(count) => positive_count(field, count),
        None if value.is_null() => Err(PricingError::InvalidInput {
            message: format!("{} is required", field),
        }),
        None => Err(PricingError::InvalidInput {
            message: format!("{} must be a whole number, got {}", field, value),
        }),
    }
}

fn parse_count(field: &str, value: &str) -> Result<u32, PricingError> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| PricingError::InvalidInput {
            message: format!("{} must be a whole number, got '{}'", field, value.trim()),
        })?;
    positive_count(field, parsed)
}

impl EstimateRequest {
    pub fn into_trip_request(self) -> Result<TripRequest, PricingError> {
        Ok(TripRequest {
            travelers: json_count("Travelers", &self.travelers)?,
            days: json_count("Days", &self.days)?,
            visitor_type: self.visitor_type.parse()?,
            budget_tier: self.budget_tier.parse()?,
            season: Season::parse_optional(self.season.as_deref())?,
            currency_code: self.currency.unwrap_or_default(),
        })
    }
}

impl EstimateForm {
    pub fn into_trip_request(self) -> Result<TripRequest, PricingError> {
        Ok(TripRequest {
            travelers: parse_count("Travelers", &self.travelers)?,
            days: parse_count("Days", &self.days)?,
            visitor_type: self.visitor_type.parse()?,
            budget_tier: self.budget_level.parse()?,
            season: Season::parse_optional(self.season.as_deref())?,
            currency_code: self.currency.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{BudgetTier, VisitorType};

    fn request() -> EstimateRequest {
        EstimateRequest {
            travelers: Value::from(2),
            days: Value::from(5),
            visitor_type: "international".to_string(),
            budget_tier: "mid-range".to_string(),
            season: None,
            currency: None,
        }
    }

    #[test]
    fn test_json_request_conversion() {
        let trip = request().into_trip_request().unwrap();
        assert_eq!(trip.travelers, 2);
        assert_eq!(trip.days, 5);
        assert_eq!(trip.visitor_type, VisitorType::International);
        assert_eq!(trip.budget_tier, BudgetTier::MidRange);
        assert_eq!(trip.season, None);
        assert_eq!(trip.currency_code, "");
    }

    #[test]
    fn test_non_positive_counts_rejected() {
        let mut req = request();
        req.travelers = Value::from(0);
        assert!(matches!(
            req.into_trip_request(),
            Err(PricingError::InvalidInput { .. })
        ));

        let mut req = request();
        req.days = Value::from(-3);
        assert!(matches!(
            req.into_trip_request(),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_empty_budget_tier_rejected() {
        let mut req = request();
        req.budget_tier = String::new();
        assert!(matches!(
            req.into_trip_request(),
            Err(PricingError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_json_deserialization_defaults() {
        let req: EstimateRequest = serde_json::from_str(
            r#"{"travelers":1,"days":3,"visitor_type":"resident","budget_tier":"budget"}"#,
        )
        .unwrap();
        assert!(req.season.is_none());
        assert!(req.currency.is_none());
    }

    #[test]
    fn test_json_fractional_or_missing_count_rejected() {
        let mut req = request();
        req.travelers = Value::from(2.5);
        let err = req.into_trip_request().unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { .. }));
        assert!(err.message().contains("2.5"));

        let req: EstimateRequest = serde_json::from_str(
            r#"{"days":3,"visitor_type":"resident","budget_tier":"budget"}"#,
        )
        .unwrap();
        let err = req.into_trip_request().unwrap_err();
        assert_eq!(err.message(), "Travelers is required");

        let mut req = request();
        req.days = Value::from("5");
        assert!(matches!(
            req.into_trip_request(),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_json_missing_tier_is_invalid_tier() {
        let req: EstimateRequest =
            serde_json::from_str(r#"{"travelers":1,"days":1,"visitor_type":"resident"}"#).unwrap();
        assert!(matches!(
            req.into_trip_request(),
            Err(PricingError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_form_conversion() {
        let form = EstimateForm {
            travelers: " 4 ".to_string(),
            days: "7".to_string(),
            visitor_type: "resident".to_string(),
            budget_level: "luxury".to_string(),
            season: Some(String::new()),
            currency: Some("kes".to_string()),
        };
        let trip = form.into_trip_request().unwrap();
        assert_eq!(trip.travelers, 4);
        assert_eq!(trip.days, 7);
        assert_eq!(trip.season, None);
        assert_eq!(trip.currency_code, "kes");
    }

    #[test]
    fn test_form_garbled_number() {
        let form = EstimateForm {
            travelers: "two".to_string(),
            days: "7".to_string(),
            visitor_type: "resident".to_string(),
            budget_level: "luxury".to_string(),
            season: None,
            currency: None,
        };
        let err = form.into_trip_request().unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { .. }));
        assert!(err.message().contains("two"));
    }
}
