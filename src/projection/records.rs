//! Projection output structures
//!
//! Figures are kept at full precision; rounding happens in [`crate::report`].

use serde::Serialize;

use super::rates::RateBasis;

/// Financial results for one projection year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    pub year: u32,
    pub adoption_rate: f64,

    // Benefits
    pub productivity_savings: f64,
    pub absence_savings: f64,
    pub retention_savings: f64,
    pub year_benefits: f64,

    // Costs
    pub ai_subscription: f64,
    pub one_time_costs: f64,
    pub year_costs: f64,

    pub net_benefit: f64,
    /// Net benefit discounted to the start of year 1
    pub npv: f64,
    pub cumulative_net_benefit: f64,
}

impl YearRecord {
    pub fn new(year: u32, adoption_rate: f64) -> Self {
        Self {
            year,
            adoption_rate,
            productivity_savings: 0.0,
            absence_savings: 0.0,
            retention_savings: 0.0,
            year_benefits: 0.0,
            ai_subscription: 0.0,
            one_time_costs: 0.0,
            year_costs: 0.0,
            net_benefit: 0.0,
            npv: 0.0,
            cumulative_net_benefit: 0.0,
        }
    }

    fn figures(&self) -> [f64; 11] {
        [
            self.adoption_rate,
            self.productivity_savings,
            self.absence_savings,
            self.retention_savings,
            self.year_benefits,
            self.ai_subscription,
            self.one_time_costs,
            self.year_costs,
            self.net_benefit,
            self.npv,
            self.cumulative_net_benefit,
        ]
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.figures().iter().all(|v| v.is_finite())
    }
}

/// Totals across the projection horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_benefits: f64,
    pub total_costs: f64,
    pub net_benefit: f64,
    /// 0 when there are no costs
    pub roi_percent: f64,
    pub npv_total: f64,
    /// First year in which cumulative net benefit is non-negative
    pub payback_year: Option<u32>,
}

impl Summary {
    pub(crate) fn is_finite(&self) -> bool {
        [
            self.total_benefits,
            self.total_costs,
            self.net_benefit,
            self.roi_percent,
            self.npv_total,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// One record per year, ascending from year 1
    pub years: Vec<YearRecord>,
    pub summary: Summary,
    /// Derived rates the projection was computed from
    pub rates: RateBasis,
}

impl Projection {
    /// Record for a given year (1-indexed)
    pub fn year(&self, year: u32) -> Option<&YearRecord> {
        let idx = (year as usize).checked_sub(1)?;
        self.years.get(idx)
    }

    pub fn total_productivity_savings(&self) -> f64 {
        self.years.iter().map(|r| r.productivity_savings).sum()
    }

    pub fn total_absence_savings(&self) -> f64 {
        self.years.iter().map(|r| r.absence_savings).sum()
    }

    pub fn total_retention_savings(&self) -> f64 {
        self.years.iter().map(|r| r.retention_savings).sum()
    }
}
