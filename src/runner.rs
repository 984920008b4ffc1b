//! Scenario runner for efficient batch calculations
//!
//! Builds the plan registry once, then allows running many scenarios without
//! reconstructing it per request.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plans::{PlanId, PlanRegistry};
use crate::projection::{
    detect_crossing, simulate_balance, BalanceTrajectory, CombinedYear, ProjectionEngine,
    ProjectionResult, ThresholdCrossing,
};
use crate::scenario::Scenario;

/// Everything computed for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Per-year repayment projection
    pub projection: ProjectionResult,

    /// When the salary is projected to start triggering repayments
    pub crossing: ThresholdCrossing,

    /// Balance trajectory, present when an opening balance was supplied
    pub balance: Option<BalanceTrajectory>,
}

/// Pre-loaded runner over a fixed plan registry
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for growth in [0.0, 2.5, 5.0] {
///     let scenario = Scenario::new(24_000.0, growth, PlanId::Plan2, 2025);
///     let outcome = runner.run(&scenario)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create a runner over the published UK plan registry
    pub fn new() -> Self {
        Self {
            engine: ProjectionEngine::new(PlanRegistry::uk_published()),
        }
    }

    /// Create a runner over an explicit registry
    pub fn with_registry(registry: PlanRegistry) -> Self {
        Self {
            engine: ProjectionEngine::new(registry),
        }
    }

    /// The underlying engine
    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Project one scenario and derive its crossing summary
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioOutcome> {
        let projection = self.engine.project_result(scenario)?;
        let crossing = detect_crossing(&projection.years);

        Ok(ScenarioOutcome {
            projection,
            crossing,
            balance: None,
        })
    }

    /// Project one scenario and simulate a loan balance over the same salary
    /// series
    pub fn run_with_balance(
        &self,
        scenario: &Scenario,
        initial_balance: f64,
    ) -> Result<ScenarioOutcome> {
        let mut outcome = self.run(scenario)?;
        let plan = self.engine.registry().get(scenario.plan)?;
        let income = scenario.salary_series();
        outcome.balance = Some(simulate_balance(initial_balance, &income, plan));
        Ok(outcome)
    }

    /// Run many scenarios; each result is independent
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<Result<ScenarioOutcome>> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }

    /// Combined two-loan projection over one scenario's salary series
    pub fn run_combined(
        &self,
        scenario: &Scenario,
        plan_a: PlanId,
        plan_b: PlanId,
    ) -> Result<Vec<CombinedYear>> {
        self.engine.combine(scenario, plan_a, plan_b)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
