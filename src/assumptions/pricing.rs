//! AI tool pricing: recurring subscription model and one-time rollout costs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::check_non_negative;
use crate::error::{Result, RoiError};

/// Subscription cost model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingMode {
    /// Licence per actively adopting teacher
    #[default]
    PerTeacher,
    /// Flat licence for the whole school
    PerSchool,
}

impl FromStr for PricingMode {
    type Err = RoiError;

    /// Accepts `PerTeacher`, `Per Teacher`, `per_teacher`, `per-teacher` (and the school forms)
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "perteacher" => Ok(PricingMode::PerTeacher),
            "perschool" => Ok(PricingMode::PerSchool),
            _ => Err(RoiError::invalid(
                "pricing_mode",
                format!("unrecognised pricing mode '{s}', expected PerTeacher or PerSchool"),
            )),
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::PerTeacher => write!(f, "Per Teacher"),
            PricingMode::PerSchool => write!(f, "Per School"),
        }
    }
}

/// Pricing inputs for the tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingAssumptions {
    pub pricing_mode: PricingMode,
    pub ai_cost_per_teacher: f64,
    pub ai_cost_per_school: f64,
    /// Scale the per-school licence by the adoption fraction
    pub scale_school_cost_by_adoption: bool,
    /// One-time training cost per teacher, charged in year 1
    pub training_cost: f64,
    /// One-time setup cost per teacher, charged in year 1
    pub setup_cost: f64,
}

impl Default for PricingAssumptions {
    fn default() -> Self {
        Self {
            pricing_mode: PricingMode::PerTeacher,
            ai_cost_per_teacher: 100.0,
            ai_cost_per_school: 10_000.0,
            scale_school_cost_by_adoption: false,
            training_cost: 2_000.0,
            setup_cost: 1_000.0,
        }
    }
}

impl PricingAssumptions {
    /// Recurring subscription cost for a year at the given adoption
    pub fn subscription(&self, teachers: u32, adoption: f64) -> f64 {
        match self.pricing_mode {
            PricingMode::PerTeacher => teachers as f64 * adoption * self.ai_cost_per_teacher,
            PricingMode::PerSchool => {
                if self.scale_school_cost_by_adoption {
                    self.ai_cost_per_school * adoption
                } else {
                    self.ai_cost_per_school
                }
            }
        }
    }

    /// Training and setup, charged once in year 1 for every teacher
    pub fn one_time_costs(&self, teachers: u32) -> f64 {
        (self.training_cost + self.setup_cost) * teachers as f64
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_non_negative("ai_cost_per_teacher", self.ai_cost_per_teacher)?;
        check_non_negative("ai_cost_per_school", self.ai_cost_per_school)?;
        check_non_negative("training_cost", self.training_cost)?;
        check_non_negative("setup_cost", self.setup_cost)?;
        Ok(())
    }
}
