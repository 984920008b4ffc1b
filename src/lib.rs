//! Repayment Engine - projection engine for UK income-contingent student loans
//!
//! This library provides:
//! - A fixed registry of published plan constants (thresholds, rates,
//!   interest rules, write-off horizons)
//! - Year-indexed salary/repayment projections with threshold-crossing
//!   detection and month-of-crossing estimation
//! - Interest/balance simulation with income-dependent rates and forced
//!   write-off
//! - Combined two-loan aggregation with per-year marginal rates

pub mod error;
pub mod plans;
pub mod projection;
pub mod runner;
pub mod scenario;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use plans::{InterestRule, LoanPlan, PlanId, PlanRegistry};
pub use projection::{
    detect_crossing, simulate_balance, BalanceTrajectory, CombinedYear, ProjectionEngine,
    ProjectionResult, ThresholdCrossing, YearProjection,
};
pub use runner::{ScenarioOutcome, ScenarioRunner};
pub use scenario::Scenario;
