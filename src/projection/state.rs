//! Running totals carried from one projection year to the next

use super::records::{Summary, YearRecord};

/// Accumulators across projection years
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    /// Sum of net benefit over all years projected so far
    pub cumulative_net_benefit: f64,

    /// Sum of discounted net benefit
    pub npv_total: f64,

    pub total_benefits: f64,

    pub total_costs: f64,

    /// Set once, the first time cumulative net benefit reaches zero
    pub payback_year: Option<u32>,
}

impl ProjectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a completed year into the totals and stamp its cumulative figure
    pub fn record_year(&mut self, row: &mut YearRecord) {
        self.cumulative_net_benefit += row.net_benefit;
        self.npv_total += row.npv;
        self.total_benefits += row.year_benefits;
        self.total_costs += row.year_costs;

        row.cumulative_net_benefit = self.cumulative_net_benefit;

        if self.payback_year.is_none() && self.cumulative_net_benefit >= 0.0 {
            self.payback_year = Some(row.year);
        }
    }

    /// Close out the projection
    pub fn into_summary(self) -> Summary {
        let net_benefit = self.total_benefits - self.total_costs;
        let roi_percent = if self.total_costs != 0.0 {
            100.0 * net_benefit / self.total_costs
        } else {
            0.0
        };

        Summary {
            total_benefits: self.total_benefits,
            total_costs: self.total_costs,
            net_benefit,
            roi_percent,
            npv_total: self.npv_total,
            payback_year: self.payback_year,
        }
    }
}
