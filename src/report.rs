//! Wire-format report built from a projection
//!
//! Rounding is applied here and nowhere else: currency to 2 decimal places,
//! adoption to 2, ROI percent to 1. Values are rounded half away from zero.

use serde::Serialize;

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::projection::{compute_projection, Projection, Summary, YearRecord};

const CURRENCY_PLACES: i32 = 2;
const ADOPTION_PLACES: i32 = 2;
const ROI_PLACES: i32 = 1;

/// Round to `places` decimal places, folding negative zero into zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn currency(value: f64) -> f64 {
    round_to(value, CURRENCY_PLACES)
}

/// Normalized assumptions echoed back with the derived rates
#[derive(Debug, Clone, Serialize)]
pub struct InputsUsed {
    #[serde(flatten)]
    pub assumptions: Assumptions,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub baseline_supply_cost: f64,
}

/// Response payload for one calculation
#[derive(Debug, Clone, Serialize)]
pub struct RoiReport {
    pub summary: Summary,
    pub annual_breakdown: Vec<YearRecord>,
    pub inputs_used: InputsUsed,
}

impl RoiReport {
    /// Round a full-precision projection for output
    pub fn from_projection(projection: &Projection, assumptions: &Assumptions) -> Self {
        let s = &projection.summary;
        let summary = Summary {
            total_benefits: currency(s.total_benefits),
            total_costs: currency(s.total_costs),
            net_benefit: currency(s.net_benefit),
            roi_percent: round_to(s.roi_percent, ROI_PLACES),
            npv_total: currency(s.npv_total),
            payback_year: s.payback_year,
        };

        let annual_breakdown = projection
            .years
            .iter()
            .map(|r| YearRecord {
                year: r.year,
                adoption_rate: round_to(r.adoption_rate, ADOPTION_PLACES),
                productivity_savings: currency(r.productivity_savings),
                absence_savings: currency(r.absence_savings),
                retention_savings: currency(r.retention_savings),
                year_benefits: currency(r.year_benefits),
                ai_subscription: currency(r.ai_subscription),
                one_time_costs: currency(r.one_time_costs),
                year_costs: currency(r.year_costs),
                net_benefit: currency(r.net_benefit),
                npv: currency(r.npv),
                cumulative_net_benefit: currency(r.cumulative_net_benefit),
            })
            .collect();

        let rates = &projection.rates;
        Self {
            summary,
            annual_breakdown,
            inputs_used: InputsUsed {
                assumptions: assumptions.clone(),
                hourly_rate: currency(rates.hourly_rate),
                daily_rate: currency(rates.daily_rate),
                baseline_supply_cost: currency(rates.baseline_supply_cost),
            },
        }
    }
}

/// Resolve a request body over the defaults, project it and build the report
pub fn calculate(body: &serde_json::Value) -> Result<RoiReport> {
    let assumptions = Assumptions::from_json(body)?;
    calculate_with(&assumptions)
}

/// Project already-resolved assumptions and build the report
pub fn calculate_with(assumptions: &Assumptions) -> Result<RoiReport> {
    let projection = compute_projection(assumptions)?;
    Ok(RoiReport::from_projection(&projection, assumptions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(30.180246913580245, 2), 30.18);
        assert_eq!(round_to(295.6854948640483, 1), 295.7);
        assert_eq!(round_to(-82_841.876, 2), -82_841.88);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
    }

    #[test]
    fn test_default_report() {
        let report = calculate(&json!({})).unwrap();

        assert_eq!(report.summary.roi_percent, 295.7);
        assert_eq!(report.summary.payback_year, Some(2));
        assert_eq!(report.summary.total_costs, 198_600.0);
        assert_eq!(report.summary.npv_total, 509_916.82);
        assert_eq!(report.annual_breakdown.len(), 5);
        assert_eq!(report.annual_breakdown[0].year_costs, 182_400.0);
        assert_eq!(report.annual_breakdown[0].adoption_rate, 0.4);
        assert_eq!(report.annual_breakdown[0].productivity_savings, 96_102.12);
        assert_eq!(report.inputs_used.hourly_rate, 30.18);
        assert_eq!(report.inputs_used.daily_rate, 325.95);
        assert_eq!(report.inputs_used.baseline_supply_cost, 86_400.0);
    }

    #[test]
    fn test_report_json_shape() {
        let report = calculate(&json!({"teachers": 30})).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        for key in ["total_benefits", "total_costs", "net_benefit", "roi_percent", "npv_total", "payback_year"] {
            assert!(value["summary"].get(key).is_some(), "summary missing {key}");
        }
        let year = &value["annual_breakdown"][0];
        for key in [
            "year",
            "adoption_rate",
            "productivity_savings",
            "absence_savings",
            "retention_savings",
            "year_benefits",
            "year_costs",
            "net_benefit",
            "npv",
            "cumulative_net_benefit",
        ] {
            assert!(year.get(key).is_some(), "annual_breakdown missing {key}");
        }
        assert_eq!(value["inputs_used"]["teachers"], 30);
        assert_eq!(value["inputs_used"]["pricing_mode"], "PerTeacher");
    }

    #[test]
    fn test_null_payback_serializes_as_null() {
        let report = calculate(&json!({"training_cost": 50000})).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["summary"]["payback_year"].is_null());
    }

    #[test]
    fn test_invalid_input_propagates() {
        assert!(calculate(&json!({"horizon_years": 0})).is_err());
    }
}
