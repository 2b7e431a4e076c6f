//! ROI assumptions: workforce, absence, retention, pricing and adoption

mod adoption;
mod pricing;
mod workforce;
pub mod input;

pub use adoption::AdoptionSchedule;
pub use input::AssumptionsInput;
pub use pricing::{PricingAssumptions, PricingMode};
pub use workforce::{AbsenceAssumptions, RetentionAssumptions, Workforce};

use serde::Serialize;

use crate::error::{Result, RoiError};

/// Default fraction of working time the tool saves
pub const DEFAULT_EFFECTIVE_TIME_SAVED_RATE: f64 = 0.063;

/// Default projection length in years
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Default annual discount rate for NPV
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.035;

/// Longest projection the engine will run
pub const MAX_HORIZON_YEARS: u32 = 50;

/// Fully resolved assumption set for one projection
///
/// Serializes flat, so the JSON form has the same keys as a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assumptions {
    #[serde(flatten)]
    pub workforce: Workforce,
    #[serde(flatten)]
    pub absence: AbsenceAssumptions,
    #[serde(flatten)]
    pub retention: RetentionAssumptions,
    #[serde(flatten)]
    pub pricing: PricingAssumptions,
    pub adoption_by_year: AdoptionSchedule,
    pub effective_time_saved_rate: f64,
    pub horizon_years: u32,
    pub discount_rate: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            workforce: Workforce::default(),
            absence: AbsenceAssumptions::default(),
            retention: RetentionAssumptions::default(),
            pricing: PricingAssumptions::default(),
            adoption_by_year: AdoptionSchedule::default(),
            effective_time_saved_rate: DEFAULT_EFFECTIVE_TIME_SAVED_RATE,
            horizon_years: DEFAULT_HORIZON_YEARS,
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl Assumptions {
    /// Resolve a JSON request body over the default assumptions
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        AssumptionsInput::from_json(value)?.resolve()
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<()> {
        self.workforce.validate()?;
        self.absence.validate()?;
        self.retention.validate()?;
        self.pricing.validate()?;
        self.adoption_by_year.validate()?;
        check_fraction("effective_time_saved_rate", self.effective_time_saved_rate)?;
        check_non_negative("discount_rate", self.discount_rate)?;
        if self.horizon_years < 1 {
            return Err(RoiError::invalid("horizon_years", "must be at least 1"));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(RoiError::invalid(
                "horizon_years",
                format!("must be at most {MAX_HORIZON_YEARS}"),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RoiError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(RoiError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<()> {
    check_non_negative(field, value)?;
    if value == 0.0 {
        return Err(RoiError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn check_fraction(field: &str, value: f64) -> Result<()> {
    check_non_negative(field, value)?;
    if value > 1.0 {
        return Err(RoiError::invalid(field, format!("must lie in [0, 1] (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let assumptions = Assumptions::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.workforce.teachers, 60);
        assert_eq!(assumptions.horizon_years, 5);
        assert_eq!(assumptions.pricing.pricing_mode, PricingMode::PerTeacher);
        assert!(assumptions.retention.lag_retention_benefits);
    }

    #[test]
    fn test_horizon_bounds() {
        let mut assumptions = Assumptions::default();
        assumptions.horizon_years = 0;
        assert!(assumptions.validate().is_err());

        assumptions.horizon_years = MAX_HORIZON_YEARS + 1;
        assert!(assumptions.validate().is_err());

        assumptions.horizon_years = MAX_HORIZON_YEARS;
        assert!(assumptions.validate().is_ok());
    }

    #[test]
    fn test_flat_serialization() {
        let json = serde_json::to_value(Assumptions::default()).unwrap();
        assert_eq!(json["teachers"], 60);
        assert_eq!(json["supply_day_rate"], 180.0);
        assert_eq!(json["pricing_mode"], "PerTeacher");
        assert_eq!(json["adoption_by_year"]["3"], 0.6);
        assert!(json.get("workforce").is_none());
    }

    #[test]
    fn test_check_helpers() {
        assert!(check_non_negative("x", 0.0).is_ok());
        assert!(check_non_negative("x", f64::NAN).is_err());
        assert!(check_positive("x", 0.0).is_err());
        assert!(check_fraction("x", 1.0).is_ok());
        assert!(check_fraction("x", 1.01).is_err());
    }
}
