//! Loan plan data structures
//!
//! A plan is a named income-contingent repayment regime: the annual income
//! threshold below which nothing is deducted, the deduction rate on income
//! above it, the interest rule, and the write-off horizon.

use serde::{Deserialize, Serialize};

use super::interest::InterestRule;
use crate::error::EngineError;

/// Identifier for a repayment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanId {
    Plan1,
    Plan2,
    Plan4,
    Plan5,
    Postgraduate,
}

impl PlanId {
    /// Parse a plan id from its external string form (CLI flag, CSV column,
    /// JSON field). Case-insensitive, spaces ignored.
    pub fn parse(id: &str) -> Result<Self, EngineError> {
        let normalized: String = id
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "plan1" => Ok(PlanId::Plan1),
            "plan2" => Ok(PlanId::Plan2),
            "plan4" => Ok(PlanId::Plan4),
            "plan5" => Ok(PlanId::Plan5),
            "postgraduate" | "postgrad" | "pgl" => Ok(PlanId::Postgraduate),
            _ => Err(EngineError::UnknownPlan(id.to_string())),
        }
    }

    /// Canonical string form of the id
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Plan1 => "plan1",
            PlanId::Plan2 => "plan2",
            PlanId::Plan4 => "plan4",
            PlanId::Plan5 => "plan5",
            PlanId::Postgraduate => "postgraduate",
        }
    }
}

impl std::str::FromStr for PlanId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanId::parse(s)
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single repayment regime with its published constants
///
/// Plans are immutable once constructed. Invariants: `threshold >= 0`,
/// `0 < rate <= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    /// Registry identifier
    pub id: PlanId,

    /// Display label (e.g. "Plan 2", "Postgraduate")
    pub name: String,

    /// Annual income below which repayment is zero
    pub threshold: f64,

    /// Fraction of income above the threshold deducted annually
    pub rate: f64,

    /// How interest accrues on the balance
    pub interest_rule: InterestRule,

    /// Years after first liability at which any remaining balance is written off
    pub writeoff_years: u32,
}

impl LoanPlan {
    /// Annual repayment due at a given salary
    pub fn annual_repayment(&self, salary: f64) -> f64 {
        (salary - self.threshold).max(0.0) * self.rate
    }

    /// Whether a salary sits at or above the repayment threshold
    pub fn is_above_threshold(&self, salary: f64) -> bool {
        salary >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_id_parse() {
        assert_eq!(PlanId::parse("plan2").unwrap(), PlanId::Plan2);
        assert_eq!(PlanId::parse("Plan 2").unwrap(), PlanId::Plan2);
        assert_eq!(PlanId::parse("PLAN_4").unwrap(), PlanId::Plan4);
        assert_eq!(PlanId::parse("postgraduate").unwrap(), PlanId::Postgraduate);
        assert_eq!(PlanId::parse("pgl").unwrap(), PlanId::Postgraduate);
    }

    #[test]
    fn test_plan_id_parse_unknown() {
        let err = PlanId::parse("plan3").unwrap_err();
        assert_eq!(err, EngineError::UnknownPlan("plan3".to_string()));
    }

    #[test]
    fn test_annual_repayment() {
        let plan = LoanPlan {
            id: PlanId::Plan2,
            name: "Plan 2".to_string(),
            threshold: 27_295.0,
            rate: 0.09,
            interest_rule: InterestRule::RpiOnly { rate: 0.043 },
            writeoff_years: 30,
        };

        assert_eq!(plan.annual_repayment(27_295.0), 0.0);
        assert_eq!(plan.annual_repayment(20_000.0), 0.0);
        assert!((plan.annual_repayment(30_000.0) - 243.45).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_boundary_counts_as_above() {
        let plan = LoanPlan {
            id: PlanId::Postgraduate,
            name: "Postgraduate".to_string(),
            threshold: 21_000.0,
            rate: 0.06,
            interest_rule: InterestRule::Fixed { rate: 0.065 },
            writeoff_years: 30,
        };

        assert!(plan.is_above_threshold(21_000.0));
        assert!(!plan.is_above_threshold(20_999.99));
    }
}
