//! Loan plan registry
//!
//! The registry is a fixed table of published government figures (threshold,
//! deduction rate, interest parameters, write-off horizon) per plan. It is
//! built once at startup and injected into the engine; there is no dynamic
//! plan creation and no external configuration for its entries. The site's
//! guide prose quotes these numbers as ground truth, so they change only when
//! the government publishes new ones.

mod interest;
mod plan;

pub use interest::InterestRule;
pub use plan::{LoanPlan, PlanId};

use crate::error::{EngineError, Result};

/// Immutable container of the registered loan plans
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    plans: Vec<LoanPlan>,
}

impl PlanRegistry {
    /// Build the registry from the published UK figures
    pub fn uk_published() -> Self {
        Self {
            plans: vec![
                LoanPlan {
                    id: PlanId::Plan1,
                    name: "Plan 1".to_string(),
                    threshold: 24_990.0,
                    rate: 0.09,
                    interest_rule: InterestRule::RpiOnly { rate: 0.043 },
                    writeoff_years: 25,
                },
                LoanPlan {
                    id: PlanId::Plan2,
                    name: "Plan 2".to_string(),
                    threshold: 27_295.0,
                    rate: 0.09,
                    // RPI at the lower threshold rising to RPI + 3% at the upper bound
                    interest_rule: InterestRule::SlidingScale {
                        low_rate: 0.043,
                        high_rate: 0.073,
                        low_income_bound: 27_295.0,
                        high_income_bound: 49_130.0,
                    },
                    writeoff_years: 30,
                },
                LoanPlan {
                    id: PlanId::Plan4,
                    name: "Plan 4".to_string(),
                    threshold: 31_395.0,
                    rate: 0.09,
                    interest_rule: InterestRule::RpiOnly { rate: 0.043 },
                    writeoff_years: 30,
                },
                LoanPlan {
                    id: PlanId::Plan5,
                    name: "Plan 5".to_string(),
                    threshold: 25_000.0,
                    rate: 0.09,
                    interest_rule: InterestRule::RpiOnly { rate: 0.043 },
                    writeoff_years: 40,
                },
                LoanPlan {
                    id: PlanId::Postgraduate,
                    name: "Postgraduate".to_string(),
                    threshold: 21_000.0,
                    rate: 0.06,
                    interest_rule: InterestRule::Fixed { rate: 0.065 },
                    writeoff_years: 30,
                },
            ],
        }
    }

    /// Build a registry from explicit plans (used by tests and sensitivity runs)
    pub fn with_plans(plans: Vec<LoanPlan>) -> Self {
        Self { plans }
    }

    /// Look up a plan by its external string id
    pub fn lookup(&self, plan_id: &str) -> Result<&LoanPlan> {
        let id = PlanId::parse(plan_id)?;
        self.get(id)
    }

    /// Look up a plan by its typed id
    pub fn get(&self, id: PlanId) -> Result<&LoanPlan> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::UnknownPlan(id.as_str().to_string()))
    }

    /// All registered plans, in registry order
    pub fn plans(&self) -> &[LoanPlan] {
        &self.plans
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::uk_published()
    }
}
