//! Scenario runner for batch and sensitivity projections
//!
//! Holds one resolved base assumption set; each scenario supplies overrides
//! that are resolved over that base and projected independently.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::{Assumptions, AssumptionsInput};
use crate::error::Result;
use crate::projection::{compute_projection, Projection};

/// Adoption multipliers used by the default sensitivity sweep
pub const DEFAULT_ADOPTION_MULTIPLIERS: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];

/// One named set of overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    #[serde(default)]
    pub assumptions: AssumptionsInput,
}

/// Outcome of one scenario in a batch
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<Projection>,
}

/// One row of an adoption sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub adoption_multiplier: f64,
    pub total_benefits: f64,
    pub total_costs: f64,
    pub roi_percent: f64,
    pub npv_total: f64,
    pub payback_year: Option<u32>,
}

/// Pre-resolved scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let outcomes = runner.run_batch(&scenarios);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Runner over the default assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default(),
        }
    }

    /// Runner over a caller-supplied base
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Resolve overrides over the base and project them
    pub fn run(&self, overrides: &AssumptionsInput) -> Result<Projection> {
        let assumptions = overrides.resolve_over(&self.base_assumptions)?;
        compute_projection(&assumptions)
    }

    /// Run every scenario in parallel; a failing scenario does not affect the others
    pub fn run_batch(&self, scenarios: &[NamedScenario]) -> Vec<ScenarioOutcome> {
        log::info!("Running {} scenarios", scenarios.len());

        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: self.run(&scenario.assumptions),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                log::warn!("Scenario '{}' failed: {}", outcome.name, e);
            }
        }
        outcomes
    }

    /// Scale the base adoption ramp by each multiplier (clamped to [0, 1])
    pub fn adoption_sweep(&self, multipliers: &[f64]) -> Result<Vec<SweepPoint>> {
        multipliers
            .par_iter()
            .map(|&multiplier| {
                let mut assumptions = self.base_assumptions.clone();
                assumptions.adoption_by_year = assumptions.adoption_by_year.scaled(multiplier);
                let summary = compute_projection(&assumptions)?.summary;
                Ok(SweepPoint {
                    adoption_multiplier: multiplier,
                    total_benefits: summary.total_benefits,
                    total_costs: summary.total_costs,
                    roi_percent: summary.roi_percent,
                    npv_total: summary.npv_total,
                    payback_year: summary.payback_year,
                })
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
