//! Core projection engine for year-by-year ROI projections

use crate::assumptions::Assumptions;
use crate::error::{Result, RoiError};
use super::rates::{discount_factor, RateBasis};
use super::records::{Projection, YearRecord};
use super::state::ProjectionState;

/// Main projection engine
///
/// Holds a validated assumption set and the rates derived from it. Running a
/// projection does not mutate the engine, so one engine can be shared freely.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    rates: RateBasis,
}

impl ProjectionEngine {
    /// Create an engine, validating the assumptions first
    pub fn new(assumptions: Assumptions) -> Result<Self> {
        assumptions.validate()?;
        let rates = RateBasis::from_assumptions(&assumptions);
        Ok(Self { assumptions, rates })
    }

    /// Run the projection over the full horizon
    pub fn project(&self) -> Result<Projection> {
        let mut state = ProjectionState::new();
        let mut years = Vec::with_capacity(self.assumptions.horizon_years as usize);

        for year in 1..=self.assumptions.horizon_years {
            let mut row = self.calculate_year(year);
            state.record_year(&mut row);

            log::trace!(
                "Year {}: benefits={:.2} costs={:.2} net={:.2} cumulative={:.2}",
                row.year,
                row.year_benefits,
                row.year_costs,
                row.net_benefit,
                row.cumulative_net_benefit
            );

            if !row.is_finite() {
                return Err(RoiError::Computation(format!(
                    "year {year} produced a non-finite figure"
                )));
            }
            years.push(row);
        }

        let summary = state.into_summary();
        if !summary.is_finite() {
            return Err(RoiError::Computation("summary totals are not finite".into()));
        }

        log::debug!(
            "Projected {} years: ROI {:.1}%, NPV {:.2}, payback {:?}",
            years.len(),
            summary.roi_percent,
            summary.npv_total,
            summary.payback_year
        );

        Ok(Projection {
            years,
            summary,
            rates: self.rates,
        })
    }

    /// Benefits, costs and discounting for a single year
    fn calculate_year(&self, year: u32) -> YearRecord {
        let a = &self.assumptions;
        let teachers = a.workforce.teachers as f64;
        let adoption = a.adoption_by_year.rate(year);
        let mut row = YearRecord::new(year, adoption);

        // Benefits
        row.productivity_savings = a.effective_time_saved_rate
            * a.workforce.annual_hours()
            * adoption
            * teachers
            * self.rates.hourly_rate;

        row.absence_savings =
            self.rates.baseline_supply_cost * a.absence.absence_reduction_pct * adoption;

        row.retention_savings = if a.retention.is_lagged(year) {
            0.0
        } else {
            a.retention.avoided_leavers(a.workforce.teachers)
                * a.retention.replacement_cost
                * adoption
        };

        row.year_benefits = row.productivity_savings + row.absence_savings + row.retention_savings;

        // Costs
        row.ai_subscription = a.pricing.subscription(a.workforce.teachers, adoption);
        row.one_time_costs = if year == 1 {
            a.pricing.one_time_costs(a.workforce.teachers)
        } else {
            0.0
        };
        row.year_costs = row.ai_subscription + row.one_time_costs;

        row.net_benefit = row.year_benefits - row.year_costs;
        row.npv = row.net_benefit * discount_factor(a.discount_rate, year);

        row
    }
}

/// Validate `assumptions` and project them
pub fn compute_projection(assumptions: &Assumptions) -> Result<Projection> {
    ProjectionEngine::new(assumptions.clone())?.project()
}
