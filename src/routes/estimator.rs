//! Estimator page route handlers
//!
//! The HTML presenter: parses the form, calls the engine and renders the
//! estimate. Rounding and percentages are display concerns and live here.

use askama::Template;
use axum::{extract::State, response::Html, Form};

use crate::currency::Currency;
use crate::error::Result;
use crate::pricing::requests::EstimateForm;
use crate::pricing::{Category, Estimate, Season, SeasonPolicy};
use crate::AppState;

/// Select option for the form
pub struct SelectOption {
    pub value: &'static str,
    pub label: String,
}

/// One breakdown line on the result page
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    pub label: &'static str,
    pub amount: String,
    pub percent: i64,
}

/// Estimator form template
#[derive(Template)]
#[template(path = "estimator/form.html")]
pub struct EstimatorFormTemplate {
    seasons: Vec<SelectOption>,
    currencies: Vec<SelectOption>,
}

/// Estimate result template
#[derive(Template)]
#[template(path = "estimator/result.html")]
struct EstimateResultTemplate {
    total: String,
    lines: Vec<BreakdownLine>,
    season_label: String,
    savings: String,
    has_savings: bool,
    warnings: Vec<String>,
    has_warnings: bool,
}

/// Estimator form page
pub async fn form() -> EstimatorFormTemplate {
    let policy = SeasonPolicy;
    EstimatorFormTemplate {
        seasons: Season::ALL
            .into_iter()
            .map(|season| SelectOption {
                value: season.as_str(),
                label: policy.entry(season).label.to_string(),
            })
            .collect(),
        currencies: Currency::ALL
            .into_iter()
            .map(|currency| SelectOption {
                value: currency.code(),
                label: format!("{} ({})", currency.code(), currency.symbol()),
            })
            .collect(),
    }
}

/// Form submission: compute and render the estimate
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<EstimateForm>,
) -> Result<Html<String>> {
    let trip = form.into_trip_request()?;
    let estimate = state.engine.estimate(&trip).await?;

    let template = result_template(&estimate, state.engine.seasons());
    Ok(Html(template.render()?))
}

fn result_template(estimate: &Estimate, policy: &SeasonPolicy) -> EstimateResultTemplate {
    let result = &estimate.result;
    let symbol = result.currency_symbol.as_str();

    EstimateResultTemplate {
        total: format_money(symbol, result.total_cost),
        lines: breakdown_lines(estimate),
        season_label: policy.entry(result.season).label.to_string(),
        savings: format_money(symbol, result.season_adjustment),
        has_savings: result.season_adjustment > 0.0,
        warnings: estimate.warnings.clone(),
        has_warnings: !estimate.warnings.is_empty(),
    }
}

/// Category lines in display order, with share of the total
pub fn breakdown_lines(estimate: &Estimate) -> Vec<BreakdownLine> {
    let result = &estimate.result;
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let amount = *result.breakdown.get(&category)?;
            Some(BreakdownLine {
                label: category.label(),
                amount: format_money(&result.currency_symbol, amount),
                percent: percentage_of_total(amount, result.total_cost),
            })
        })
        .collect()
}

/// `round(part / total * 100)`, 0 for an empty total
pub fn percentage_of_total(part: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }
    (part / total * 100.0).round() as i64
}

/// Format an amount with its symbol, thousands separators and two decimals.
pub fn format_money(symbol: &str, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (digits, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let rounds_to_zero = digits.bytes().all(|b| b == b'0') && cents == "00";
    let sign = if amount < 0.0 && !rounds_to_zero { "-" } else { "" };
    // Letter symbols (KSh, R) read better spaced from the number
    let separator = if symbol.chars().any(char::is_alphabetic) { " " } else { "" };
    format!("{}{}{}{}.{}", sign, symbol, separator, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{CostResult, RateSource};
    use std::collections::BTreeMap;

    fn estimate() -> Estimate {
        Estimate {
            result: CostResult {
                total_cost: 3000.0,
                breakdown: BTreeMap::from([
                    (Category::Accom, 1800.0),
                    (Category::Parks, 700.0),
                    (Category::Transport, 500.0),
                ]),
                season_adjustment: 0.0,
                currency_symbol: "$".to_string(),
                currency_code: "USD".to_string(),
                season: Season::High,
            },
            rate_source: RateSource::Cached,
            warnings: vec![],
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", 3000.0), "$3,000.00");
        assert_eq!(format_money("$", 147.0), "$147.00");
        assert_eq!(format_money("€", 1234567.891), "€1,234,567.89");
        assert_eq!(format_money("KSh", 387000.0), "KSh 387,000.00");
        assert_eq!(format_money("$", 0.0), "$0.00");
        assert_eq!(format_money("$", 62.999999999), "$63.00");
        assert_eq!(format_money("$", -0.001), "$0.00");
        assert_eq!(format_money("R", -12.5), "-R 12.50");
    }

    #[test]
    fn test_format_money_beyond_integer_range() {
        // u32::MAX travelers and days on the luxury row
        let amount = 600.0 * f64::from(u32::MAX) * f64::from(u32::MAX);
        let formatted = format_money("$", amount);
        assert!(formatted.starts_with("$11,068,046,"), "{}", formatted);
        assert!(formatted.ends_with(".00"));

        assert_eq!(
            format_money("$", 1e20),
            "$100,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn test_percentage_of_total() {
        assert_eq!(percentage_of_total(1800.0, 3000.0), 60);
        assert_eq!(percentage_of_total(500.0, 3000.0), 17);
        assert_eq!(percentage_of_total(10.0, 0.0), 0);
    }

    #[test]
    fn test_breakdown_lines() {
        let lines = breakdown_lines(&estimate());
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            BreakdownLine {
                label: "Accommodation & Meals",
                amount: "$1,800.00".to_string(),
                percent: 60,
            }
        );
        assert_eq!(lines[1].percent, 23);
        assert_eq!(lines[2].label, "Transport");
    }

    #[test]
    fn test_result_template_renders() {
        let mut estimate = estimate();
        estimate.warnings.push("Live exchange rates unavailable".to_string());

        let html = result_template(&estimate, &SeasonPolicy).render().unwrap();
        assert!(html.contains("$3,000.00"));
        assert!(html.contains("Accommodation &amp; Meals"));
        assert!(html.contains("Live exchange rates unavailable"));
        assert!(!html.contains("You save"));
    }

    #[test]
    fn test_result_template_shows_savings() {
        let mut estimate = estimate();
        estimate.result.season = Season::Low;
        estimate.result.season_adjustment = 63.0;

        let html = result_template(&estimate, &SeasonPolicy).render().unwrap();
        assert!(html.contains("Low Season"));
        assert!(html.contains("You save $63.00"));
    }
}
