//! Staffing, absence and retention assumptions for the affected teaching workforce

use serde::{Deserialize, Serialize};

use super::{check_fraction, check_non_negative, check_positive};
use crate::error::{Result, RoiError};

/// Headcount, pay and working time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workforce {
    /// Number of teachers affected
    pub teachers: u32,
    /// Base annual salary
    pub avg_teacher_salary: f64,
    /// Employer overhead (NI, pension) as a fraction of salary
    pub employer_on_cost_pct: f64,
    pub weekly_working_hours: f64,
    pub teaching_weeks_per_year: f64,
}

impl Default for Workforce {
    fn default() -> Self {
        Self {
            teachers: 60,
            avg_teacher_salary: 48_892.0,
            employer_on_cost_pct: 0.30,
            weekly_working_hours: 54.0,
            teaching_weeks_per_year: 39.0,
        }
    }
}

impl Workforce {
    /// Salary including employer on-costs
    pub fn fully_loaded_salary(&self) -> f64 {
        self.avg_teacher_salary * (1.0 + self.employer_on_cost_pct)
    }

    /// Contracted working hours per teacher per year
    pub fn annual_hours(&self) -> f64 {
        self.weekly_working_hours * self.teaching_weeks_per_year
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.teachers == 0 {
            return Err(RoiError::invalid("teachers", "must be at least 1"));
        }
        check_non_negative("avg_teacher_salary", self.avg_teacher_salary)?;
        check_non_negative("employer_on_cost_pct", self.employer_on_cost_pct)?;
        check_positive("weekly_working_hours", self.weekly_working_hours)?;
        check_positive("teaching_weeks_per_year", self.teaching_weeks_per_year)?;
        Ok(())
    }
}

/// Absence and supply (substitute) cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceAssumptions {
    pub absence_days_per_teacher: f64,
    /// Share of absence days covered by paid supply staff
    pub supply_cover_pct: f64,
    pub supply_day_rate: f64,
    /// Reduction in absence-driven cost attributable to the tool
    pub absence_reduction_pct: f64,
}

impl Default for AbsenceAssumptions {
    fn default() -> Self {
        Self {
            absence_days_per_teacher: 8.0,
            supply_cover_pct: 1.0,
            supply_day_rate: 180.0,
            absence_reduction_pct: 0.10,
        }
    }
}

impl AbsenceAssumptions {
    /// Annual spend on supply cover before the tool is introduced
    pub fn baseline_supply_cost(&self, teachers: u32) -> f64 {
        teachers as f64 * self.absence_days_per_teacher * self.supply_cover_pct * self.supply_day_rate
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_non_negative("absence_days_per_teacher", self.absence_days_per_teacher)?;
        check_fraction("supply_cover_pct", self.supply_cover_pct)?;
        check_non_negative("supply_day_rate", self.supply_day_rate)?;
        check_fraction("absence_reduction_pct", self.absence_reduction_pct)?;
        Ok(())
    }
}

/// Staff turnover and the tool's effect on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionAssumptions {
    pub attrition_rate: f64,
    /// Reduction in attrition attributable to the tool
    pub retention_improvement: f64,
    /// Cost to recruit and onboard one replacement teacher
    pub replacement_cost: f64,
    /// Retention benefits only start in year 2
    pub lag_retention_benefits: bool,
}

impl Default for RetentionAssumptions {
    fn default() -> Self {
        Self {
            attrition_rate: 0.088,
            retention_improvement: 0.05,
            replacement_cost: 20_000.0,
            lag_retention_benefits: true,
        }
    }
}

impl RetentionAssumptions {
    /// Leavers avoided per year at full adoption
    pub fn avoided_leavers(&self, teachers: u32) -> f64 {
        teachers as f64 * self.attrition_rate * self.retention_improvement
    }

    /// Whether retention benefits are suppressed in the given year
    pub fn is_lagged(&self, year: u32) -> bool {
        self.lag_retention_benefits && year == 1
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_fraction("attrition_rate", self.attrition_rate)?;
        check_fraction("retention_improvement", self.retention_improvement)?;
        check_non_negative("replacement_cost", self.replacement_cost)?;
        Ok(())
    }
}
