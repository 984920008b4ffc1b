//! Projection engines for repayment, threshold crossing and balance simulation

mod balance;
mod crossing;
mod engine;
mod schedule;

pub use balance::{simulate_balance, BalanceSummary, BalanceTrajectory, BalanceYear};
pub use crossing::{detect_crossing, ThresholdCrossing};
pub use engine::ProjectionEngine;
pub use schedule::{CombinedYear, ProjectionResult, ProjectionSummary, YearProjection};
