//! Adoption ramp: fraction of teachers actively using the tool in each projection year

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};

/// Adoption fraction by projection year (1-indexed)
///
/// Years without an entry have zero adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdoptionSchedule {
    rates: BTreeMap<u32, f64>,
}

impl AdoptionSchedule {
    /// Build a schedule from explicit (year, fraction) pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    /// Build a schedule from a sequence where index 0 is year 1
    pub fn from_sequence(rates: &[f64]) -> Self {
        Self::from_pairs(rates.iter().enumerate().map(|(i, &r)| (i as u32 + 1, r)))
    }

    /// Default five-year ramp
    pub fn default_ramp() -> Self {
        Self::from_pairs([
            (1, 0.40),
            (2, 0.50),
            (3, 0.60),
            (4, 0.75),
            (5, 0.85),
        ])
    }

    /// Adoption fraction for a projection year, 0 when unspecified
    pub fn rate(&self, year: u32) -> f64 {
        self.rates.get(&year).copied().unwrap_or(0.0)
    }

    /// Years that carry an explicit entry
    pub fn years(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.keys().copied()
    }

    /// Multiply every entry by `factor`, clamping the result to [0, 1]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            rates: self
                .rates
                .iter()
                .map(|(&year, &rate)| (year, (rate * factor).clamp(0.0, 1.0)))
                .collect(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (&year, &rate) in &self.rates {
            if year == 0 {
                return Err(RoiError::invalid("adoption_by_year", "years start at 1"));
            }
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(RoiError::invalid(
                    "adoption_by_year",
                    format!("year {year} adoption {rate} is outside [0, 1]"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for AdoptionSchedule {
    fn default() -> Self {
        Self::default_ramp()
    }
}

/// Parse a year label such as `"3"`, `"year_3"` or `"Year 3"`
pub(crate) fn parse_year_label(label: &str) -> Option<u32> {
    let lowered = label.trim().to_ascii_lowercase();
    let digits = match lowered.strip_prefix("year") {
        Some(rest) => rest
            .strip_prefix(&['_', '-', ' '][..])
            .unwrap_or(rest),
        None => lowered.as_str(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|&year| year >= 1)
}
