//! Year-over-year loan balance simulation
//!
//! State machine over years: the state is the opening balance, a transition is
//! one year's interest accrual minus the repayment due at that year's income,
//! and the terminal state is a zero balance, reached either by repayment or
//! by the forced write-off at the plan's horizon. No transitions occur past a
//! terminal state.

use serde::{Deserialize, Serialize};

use crate::plans::LoanPlan;

/// One simulated year of balance movement
///
/// Invariant: `closing_balance = max(0, opening_balance + interest_accrued -
/// repayment_made)`, except the write-off year where closing is forced to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceYear {
    /// Offset from the first simulated year
    pub year_offset: u32,

    /// Balance at the start of the year
    pub opening_balance: f64,

    /// Interest for the year: opening balance times the resolved annual rate
    pub interest_accrued: f64,

    /// Repayment due at that year's income under the plan
    pub repayment_made: f64,

    /// Balance carried into the next year
    pub closing_balance: f64,
}

/// Full balance trajectory until the horizon, repayment or write-off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceTrajectory {
    pub years: Vec<BalanceYear>,

    /// Whether the trajectory ended by forced write-off rather than repayment
    pub written_off: bool,
}

impl BalanceTrajectory {
    /// Get summary statistics
    pub fn summary(&self) -> BalanceSummary {
        let total_interest: f64 = self.years.iter().map(|y| y.interest_accrued).sum();
        let total_repaid: f64 = self.years.iter().map(|y| y.repayment_made).sum();
        let final_balance = self.years.last().map(|y| y.closing_balance).unwrap_or(0.0);

        BalanceSummary {
            years_simulated: self.years.len() as u32,
            total_interest,
            total_repaid,
            final_balance,
            written_off: self.written_off,
        }
    }
}

/// Summary statistics for a balance trajectory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub years_simulated: u32,
    pub total_interest: f64,
    pub total_repaid: f64,
    pub final_balance: f64,
    pub written_off: bool,
}

/// Simulate the balance year by year against an income series
///
/// Each year resolves the plan's interest rate at that year's income (the
/// sliding-scale rule makes this income-dependent), accrues interest on the
/// opening balance, deducts the repayment due, and floors the result at zero.
/// At `year_offset == plan.writeoff_years` any remaining balance is
/// extinguished and the trajectory ends; nothing accrues past that row.
pub fn simulate_balance(
    initial_balance: f64,
    income_series: &[f64],
    plan: &LoanPlan,
) -> BalanceTrajectory {
    let mut years = Vec::new();
    let mut written_off = false;
    let mut opening = initial_balance.max(0.0);

    for (offset, &income) in income_series.iter().enumerate() {
        // Terminal: the loan is already closed
        if opening <= 0.0 {
            break;
        }

        let rate = plan.interest_rule.resolve(income);
        let interest_accrued = opening * rate;
        let repayment_made = plan.annual_repayment(income);
        let mut closing = (opening + interest_accrued - repayment_made).max(0.0);

        let offset = offset as u32;
        if offset == plan.writeoff_years {
            written_off = closing > 0.0;
            closing = 0.0;
        }

        years.push(BalanceYear {
            year_offset: offset,
            opening_balance: opening,
            interest_accrued,
            repayment_made,
            closing_balance: closing,
        });

        if closing <= 0.0 {
            break;
        }
        opening = closing;
    }

    BalanceTrajectory { years, written_off }
}
