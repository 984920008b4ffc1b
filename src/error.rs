//! Error types for the repayment engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur when running a calculation
///
/// Every failure is surfaced synchronously to the caller before or during a
/// single request; there are no retries and no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Scenario rejected before computation (negative salary, zero horizon,
    /// malformed growth rate)
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Requested plan id is not in the registry
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
}
