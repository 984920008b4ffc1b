//! Scenario data structures
//!
//! A scenario is one calculation request: the caller's current salary, an
//! assumed annual growth rate, the plan they repay under, and the projection
//! window. Scenarios are constructed per request, consumed once and discarded.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::plans::PlanId;

/// Default projection horizon in years
fn default_horizon_years() -> u32 {
    10
}

/// A single calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Annual salary today
    pub current_salary: f64,

    /// Assumed annual salary growth as a percentage (5.0 = 5%, may be negative)
    pub annual_growth_rate: f64,

    /// Repayment plan the loan sits on
    pub plan: PlanId,

    /// Calendar year of the first projected year
    pub start_year: i32,

    /// Number of years to project
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

impl Scenario {
    /// Create a scenario with the default 10-year horizon
    pub fn new(current_salary: f64, annual_growth_rate: f64, plan: PlanId, start_year: i32) -> Self {
        Self {
            current_salary,
            annual_growth_rate,
            plan,
            start_year,
            horizon_years: default_horizon_years(),
        }
    }

    /// Create a scenario with an explicit horizon
    pub fn with_horizon(
        current_salary: f64,
        annual_growth_rate: f64,
        plan: PlanId,
        start_year: i32,
        horizon_years: u32,
    ) -> Self {
        Self {
            current_salary,
            annual_growth_rate,
            plan,
            start_year,
            horizon_years,
        }
    }

    /// Reject malformed inputs before any computation
    pub fn validate(&self) -> Result<()> {
        if !self.current_salary.is_finite() || self.current_salary < 0.0 {
            return Err(EngineError::InvalidScenario(format!(
                "current_salary must be a non-negative number, got {}",
                self.current_salary
            )));
        }
        if !self.annual_growth_rate.is_finite() || self.annual_growth_rate < -100.0 {
            return Err(EngineError::InvalidScenario(format!(
                "annual_growth_rate must be a number >= -100, got {}",
                self.annual_growth_rate
            )));
        }
        if self.horizon_years < 1 {
            return Err(EngineError::InvalidScenario(
                "horizon_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Annual compounding factor implied by the growth rate
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.annual_growth_rate / 100.0
    }

    /// Salary at a given year offset from the start
    ///
    /// Growth compounds once per full year. Each offset is computed from the
    /// exact compounded value, never from a rounded display value, so no
    /// rounding error feeds forward.
    pub fn salary_at(&self, offset: u32) -> f64 {
        self.current_salary * self.growth_factor().powi(offset as i32)
    }

    /// The full salary series over the horizon
    pub fn salary_series(&self) -> Vec<f64> {
        (0..self.horizon_years).map(|i| self.salary_at(i)).collect()
    }
}
