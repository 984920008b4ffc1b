//! Interest rate rules for loan plans
//!
//! Each plan carries one rule. The sliding-scale rule is the Plan 2 regime
//! where the rate climbs linearly with income between two published bounds.

use serde::{Deserialize, Serialize};

/// How a plan accrues interest on the outstanding balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterestRule {
    /// Constant rate regardless of income
    Fixed {
        /// Annual rate as a decimal (0.065 = 6.5%)
        rate: f64,
    },
    /// Tracks RPI only; constant with respect to income
    RpiOnly {
        /// Published RPI figure as a decimal
        rate: f64,
    },
    /// Rate slides linearly with income between two bounds
    SlidingScale {
        /// Rate at or below the lower income bound
        low_rate: f64,
        /// Rate at or above the upper income bound
        high_rate: f64,
        /// Income at which the slide starts
        low_income_bound: f64,
        /// Income at which the slide tops out
        high_income_bound: f64,
    },
}

impl InterestRule {
    /// Resolve the annual interest rate for a given income
    pub fn resolve(&self, income: f64) -> f64 {
        match self {
            InterestRule::Fixed { rate } => *rate,
            InterestRule::RpiOnly { rate } => *rate,
            InterestRule::SlidingScale {
                low_rate,
                high_rate,
                low_income_bound,
                high_income_bound,
            } => {
                if income <= *low_income_bound {
                    *low_rate
                } else if income >= *high_income_bound {
                    *high_rate
                } else {
                    let progress =
                        (income - low_income_bound) / (high_income_bound - low_income_bound);
                    low_rate + progress * (high_rate - low_rate)
                }
            }
        }
    }
}
