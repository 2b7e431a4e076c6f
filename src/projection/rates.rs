//! Derived rates shared by every projection year
//!
//! Computed once per projection from the resolved assumptions.

use serde::Serialize;

use crate::assumptions::Assumptions;

/// Working days per week used to turn the hourly rate into a daily rate
const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// Pay and cost bases derived from the assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBasis {
    /// Salary plus employer on-costs
    pub fully_loaded_salary: f64,
    /// Working hours per teacher per year
    pub annual_hours: f64,
    /// Fully loaded cost of one teacher hour
    pub hourly_rate: f64,
    /// Fully loaded cost of one teacher day (informational)
    pub daily_rate: f64,
    /// Annual supply cover spend before adoption
    pub baseline_supply_cost: f64,
}

impl RateBasis {
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        let workforce = &assumptions.workforce;
        let fully_loaded_salary = workforce.fully_loaded_salary();
        let annual_hours = workforce.annual_hours();
        let hourly_rate = fully_loaded_salary / annual_hours;
        let daily_rate = hourly_rate * (workforce.weekly_working_hours / WORKING_DAYS_PER_WEEK);

        Self {
            fully_loaded_salary,
            annual_hours,
            hourly_rate,
            daily_rate,
            baseline_supply_cost: assumptions.absence.baseline_supply_cost(workforce.teachers),
        }
    }
}

/// End-of-year discount factor: 1 / (1 + rate)^year
pub fn discount_factor(annual_rate: f64, year: u32) -> f64 {
    1.0 / (1.0 + annual_rate).powi(year as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_rate_basis() {
        let basis = RateBasis::from_assumptions(&Assumptions::default());

        // 48892 * 1.3 / (54 * 39)
        assert_relative_eq!(basis.hourly_rate, 30.180_246_913_580_245, epsilon = 1e-9);
        assert_relative_eq!(basis.daily_rate, 325.946_666_666_666_6, epsilon = 1e-9);
        assert_relative_eq!(basis.baseline_supply_cost, 86_400.0);
        assert_relative_eq!(basis.annual_hours, 2_106.0);
    }

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(discount_factor(0.035, 1), 1.0 / 1.035);
        assert_relative_eq!(discount_factor(0.035, 2), 1.0 / (1.035 * 1.035), epsilon = 1e-12);
        assert_eq!(discount_factor(0.0, 7), 1.0);
    }
}
