//! JSON-facing assumption overrides and their normalization
//!
//! Every field is optional. Missing fields fall back to a base assumption set
//! (normally [`Assumptions::default`]); unknown fields are ignored. Resolution
//! validates the merged result and fails with `InvalidAssumptions` rather than
//! substituting a value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::adoption::parse_year_label;
use super::{AdoptionSchedule, Assumptions, PricingMode};
use crate::error::{Result, RoiError};

/// Caller-supplied overrides for any subset of the assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionsInput {
    /// Whole number; fractional values are rejected during resolution
    pub teachers: Option<f64>,
    pub avg_teacher_salary: Option<f64>,
    pub employer_on_cost_pct: Option<f64>,
    pub weekly_working_hours: Option<f64>,
    pub teaching_weeks_per_year: Option<f64>,

    pub adoption_by_year: Option<AdoptionInput>,

    pub absence_days_per_teacher: Option<f64>,
    pub supply_cover_pct: Option<f64>,
    pub supply_day_rate: Option<f64>,
    pub absence_reduction_pct: Option<f64>,

    pub attrition_rate: Option<f64>,
    pub retention_improvement: Option<f64>,
    pub replacement_cost: Option<f64>,
    #[serde(deserialize_with = "flag")]
    pub lag_retention_benefits: Option<bool>,

    pub pricing_mode: Option<String>,
    pub ai_cost_per_teacher: Option<f64>,
    pub ai_cost_per_school: Option<f64>,
    #[serde(alias = "scale_school_cost", deserialize_with = "flag")]
    pub scale_school_cost_by_adoption: Option<bool>,
    pub training_cost: Option<f64>,
    pub setup_cost: Option<f64>,

    pub effective_time_saved_rate: Option<f64>,
    /// Whole number; fractional values are rejected during resolution
    pub horizon_years: Option<f64>,
    pub discount_rate: Option<f64>,
}

/// Adoption ramp as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdoptionInput {
    /// `{"1": 0.4, "year_2": 0.5}`; JSON object keys are always strings
    ByYear(BTreeMap<String, f64>),
    /// `[0.4, 0.5, ...]` for years 1, 2, ...
    Sequence(Vec<f64>),
}

impl AdoptionInput {
    fn to_schedule(&self) -> Result<AdoptionSchedule> {
        match self {
            AdoptionInput::ByYear(entries) => {
                let mut rates = BTreeMap::new();
                for (label, &rate) in entries {
                    let year = parse_year_label(label).ok_or_else(|| {
                        RoiError::invalid(
                            "adoption_by_year",
                            format!("'{label}' is not a projection year (1, 2, ...)"),
                        )
                    })?;
                    if rates.insert(year, rate).is_some() {
                        return Err(RoiError::invalid(
                            "adoption_by_year",
                            format!("year {year} given twice"),
                        ));
                    }
                }
                Ok(AdoptionSchedule::from_pairs(rates))
            }
            AdoptionInput::Sequence(rates) => Ok(AdoptionSchedule::from_sequence(rates)),
        }
    }
}

/// Accept `true`/`false` or the legacy integer flags `0`/`1`
fn flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Int(0)) => Ok(Some(false)),
        Some(Flag::Int(1)) => Ok(Some(true)),
        Some(Flag::Int(other)) => Err(serde::de::Error::custom(format!(
            "expected a boolean or 0/1, got {other}"
        ))),
    }
}

/// Convert a whole-valued JSON number to a count
fn whole(field: &str, value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RoiError::invalid(field, format!("must be a whole number (got {value})")));
    }
    if value < 0.0 || value > u32::MAX as f64 {
        return Err(RoiError::invalid(field, format!("out of range (got {value})")));
    }
    Ok(value as u32)
}

impl AssumptionsInput {
    /// Decode a request body; the body must be a JSON object
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(RoiError::invalid("body", "expected a JSON object of assumptions"));
        }
        serde_json::from_value(value.clone()).map_err(|e| RoiError::invalid("body", e.to_string()))
    }

    /// Merge over the default assumptions
    pub fn resolve(&self) -> Result<Assumptions> {
        self.resolve_over(&Assumptions::default())
    }

    /// Merge over `base`, then validate the result
    ///
    /// A supplied `adoption_by_year` replaces the base schedule as a whole.
    pub fn resolve_over(&self, base: &Assumptions) -> Result<Assumptions> {
        let mut resolved = base.clone();

        let workforce = &mut resolved.workforce;
        if let Some(teachers) = self.teachers {
            workforce.teachers = whole("teachers", teachers)?;
        }
        set(&mut workforce.avg_teacher_salary, self.avg_teacher_salary);
        set(&mut workforce.employer_on_cost_pct, self.employer_on_cost_pct);
        set(&mut workforce.weekly_working_hours, self.weekly_working_hours);
        set(&mut workforce.teaching_weeks_per_year, self.teaching_weeks_per_year);

        let absence = &mut resolved.absence;
        set(&mut absence.absence_days_per_teacher, self.absence_days_per_teacher);
        set(&mut absence.supply_cover_pct, self.supply_cover_pct);
        set(&mut absence.supply_day_rate, self.supply_day_rate);
        set(&mut absence.absence_reduction_pct, self.absence_reduction_pct);

        let retention = &mut resolved.retention;
        set(&mut retention.attrition_rate, self.attrition_rate);
        set(&mut retention.retention_improvement, self.retention_improvement);
        set(&mut retention.replacement_cost, self.replacement_cost);
        set(&mut retention.lag_retention_benefits, self.lag_retention_benefits);

        let pricing = &mut resolved.pricing;
        if let Some(mode) = &self.pricing_mode {
            pricing.pricing_mode = mode.parse::<PricingMode>()?;
        }
        set(&mut pricing.ai_cost_per_teacher, self.ai_cost_per_teacher);
        set(&mut pricing.ai_cost_per_school, self.ai_cost_per_school);
        set(&mut pricing.scale_school_cost_by_adoption, self.scale_school_cost_by_adoption);
        set(&mut pricing.training_cost, self.training_cost);
        set(&mut pricing.setup_cost, self.setup_cost);

        if let Some(adoption) = &self.adoption_by_year {
            resolved.adoption_by_year = adoption.to_schedule()?;
        }
        set(&mut resolved.effective_time_saved_rate, self.effective_time_saved_rate);
        if let Some(horizon) = self.horizon_years {
            resolved.horizon_years = whole("horizon_years", horizon)?;
        }
        set(&mut resolved.discount_rate, self.discount_rate);

        resolved.validate()?;
        log::debug!(
            "Resolved assumptions: {} teachers, {} years, {} pricing",
            resolved.workforce.teachers,
            resolved.horizon_years,
            resolved.pricing.pricing_mode
        );
        Ok(resolved)
    }
}

fn set<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
