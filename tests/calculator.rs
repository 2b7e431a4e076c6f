//! End-to-end checks of the public calculator API

use approx::assert_abs_diff_eq;
use school_roi::{calculate, compute_projection, Assumptions, AssumptionsInput, ScenarioRunner};
use serde_json::json;

#[test]
fn default_request_matches_reference_figures() {
    let report = calculate(&json!({})).unwrap();

    let year1 = &report.annual_breakdown[0];
    assert_eq!(year1.year, 1);
    assert_eq!(year1.retention_savings, 0.0);
    assert_eq!(year1.year_costs, 182_400.0);

    assert_eq!(report.summary.payback_year, Some(2));
    assert_eq!(report.summary.roi_percent, 295.7);
    assert_eq!(report.inputs_used.hourly_rate, 30.18);
}

#[test]
fn client_payload_is_accepted() {
    // Shape sent by the web client: percentages already converted to fractions
    let body = json!({
        "teachers": 45,
        "avg_teacher_salary": 42000,
        "weekly_working_hours": 50,
        "teaching_weeks_per_year": 39,
        "absence_days_per_teacher": 6,
        "supply_day_rate": 200,
        "absence_reduction_pct": 0.15,
        "attrition_rate": 0.1,
        "retention_improvement": 0.04,
        "replacement_cost": 18000,
        "ai_cost_per_teacher": 120,
        "training_cost": 1500,
        "setup_cost": 500
    });
    let report = calculate(&body).unwrap();

    assert_eq!(report.annual_breakdown.len(), 5);
    // (1500 + 500) * 45 + 45 * 0.40 * 120
    assert_eq!(report.annual_breakdown[0].year_costs, 92_160.0);
    assert_eq!(report.inputs_used.assumptions.workforce.teachers, 45);
}

#[test]
fn rounded_totals_agree_with_rows() {
    let report = calculate(&json!({"horizon_years": 8, "adoption_by_year": {"6": 0.9, "7": 0.95, "8": 1.0, "1": 0.3}})).unwrap();
    assert_eq!(report.annual_breakdown.len(), 8);

    let benefits: f64 = report.annual_breakdown.iter().map(|r| r.year_benefits).sum();
    let costs: f64 = report.annual_breakdown.iter().map(|r| r.year_costs).sum();
    let tolerance = 0.005 * report.annual_breakdown.len() as f64;
    assert_abs_diff_eq!(report.summary.total_benefits, benefits, epsilon = tolerance);
    assert_abs_diff_eq!(report.summary.total_costs, costs, epsilon = tolerance);

    // Years 2-5 have no adoption and so no benefits or subscription
    for row in &report.annual_breakdown[1..5] {
        assert_eq!(row.adoption_rate, 0.0);
        assert_eq!(row.year_benefits, 0.0);
        assert_eq!(row.year_costs, 0.0);
    }
}

#[test]
fn lagged_retention_is_zero_in_year_one_for_any_inputs() {
    for teachers in [1.0, 17.0, 250.0] {
        for replacement_cost in [0.0, 5_000.0, 60_000.0] {
            let assumptions = AssumptionsInput {
                teachers: Some(teachers),
                replacement_cost: Some(replacement_cost),
                attrition_rate: Some(0.3),
                ..AssumptionsInput::default()
            }
            .resolve()
            .unwrap();
            let projection = compute_projection(&assumptions).unwrap();
            assert_eq!(projection.years[0].retention_savings, 0.0);
        }
    }
}

#[test]
fn payback_is_smallest_non_negative_cumulative_year() {
    let runner = ScenarioRunner::new();
    for training in [0.0, 2_000.0, 4_000.0, 8_000.0, 20_000.0] {
        let projection = runner
            .run(&AssumptionsInput {
                training_cost: Some(training),
                ..AssumptionsInput::default()
            })
            .unwrap();

        let expected = projection
            .years
            .iter()
            .find(|r| r.cumulative_net_benefit >= 0.0)
            .map(|r| r.year);
        assert_eq!(projection.summary.payback_year, expected);
    }
}

#[test]
fn repeated_calculations_are_identical() {
    let body = json!({"teachers": 80, "pricing_mode": "Per School", "scale_school_cost": 1});
    let first = serde_json::to_string(&calculate(&body).unwrap()).unwrap();
    let second = serde_json::to_string(&calculate(&body).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_inputs_fail_fast() {
    for body in [
        json!({"teachers": -1}),
        json!({"teachers": 0}),
        json!({"horizon_years": 0}),
        json!({"pricing_mode": "Per Pupil"}),
        json!({"adoption_by_year": {"1": -0.1}}),
        json!({"supply_cover_pct": 1.2}),
        json!({"avg_teacher_salary": "lots"}),
    ] {
        let err = calculate(&body).unwrap_err();
        assert_eq!(err.status_code(), 400, "{body} should be rejected");
    }
}

#[test]
fn defaults_resolve_to_documented_values() {
    let assumptions = Assumptions::from_json(&json!({})).unwrap();
    assert_eq!(assumptions.workforce.avg_teacher_salary, 48_892.0);
    assert_eq!(assumptions.discount_rate, 0.035);
    assert_eq!(assumptions.effective_time_saved_rate, 0.063);
    assert_eq!(assumptions.adoption_by_year.rate(4), 0.75);
}
