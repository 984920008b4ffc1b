//! Core projection engine for annual repayment projections

use crate::error::Result;
use crate::plans::{LoanPlan, PlanId, PlanRegistry};
use crate::scenario::Scenario;

use super::schedule::{CombinedYear, ProjectionResult, YearProjection};

/// Main projection engine
///
/// Holds the plan registry injected at construction. Every operation is a
/// pure, finite computation over its inputs; nothing is shared or mutated
/// between requests, so callers may run scenarios in parallel freely.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    registry: PlanRegistry,
}

impl ProjectionEngine {
    /// Create an engine over the given plan registry
    pub fn new(registry: PlanRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine resolves plans from
    pub fn registry(&self) -> &PlanRegistry {
        &self.registry
    }

    /// Project salary, threshold status and repayments over the horizon
    ///
    /// Salary compounds once per full year; each year's value is computed from
    /// the exact compounded figure. Growth may be negative; the projection
    /// simply declines.
    pub fn project(&self, scenario: &Scenario) -> Result<Vec<YearProjection>> {
        scenario.validate()?;
        let plan = self.registry.get(scenario.plan)?;

        let rows = (0..scenario.horizon_years)
            .map(|offset| Self::project_year(scenario, plan, offset))
            .collect();

        Ok(rows)
    }

    /// Run `project` and wrap the rows with the plan label for reporting
    pub fn project_result(&self, scenario: &Scenario) -> Result<ProjectionResult> {
        let plan_name = self.registry.get(scenario.plan)?.name.clone();
        let mut result = ProjectionResult::new(plan_name);
        for row in self.project(scenario)? {
            result.add_row(row);
        }
        Ok(result)
    }

    fn project_year(scenario: &Scenario, plan: &LoanPlan, offset: u32) -> YearProjection {
        let salary = scenario.salary_at(offset);
        let annual_repayment = plan.annual_repayment(salary);

        YearProjection {
            year: scenario.start_year + offset as i32,
            salary,
            above_threshold: plan.is_above_threshold(salary),
            annual_repayment,
            monthly_repayment: annual_repayment / 12.0,
            distance_from_threshold: salary - plan.threshold,
        }
    }

    /// Sum the obligations of two simultaneous loans over one salary series
    ///
    /// Both loans see the identical income. The combined marginal rate is
    /// recomputed each year: an income trajectory can cross one threshold
    /// before the other. No cap applies: when both rates bind, the combined
    /// deduction genuinely exceeds either plan alone.
    pub fn combine(
        &self,
        scenario: &Scenario,
        plan_a: PlanId,
        plan_b: PlanId,
    ) -> Result<Vec<CombinedYear>> {
        scenario.validate()?;
        let a = self.registry.get(plan_a)?;
        let b = self.registry.get(plan_b)?;

        let rows = (0..scenario.horizon_years)
            .map(|offset| {
                let salary = scenario.salary_at(offset);
                let repayment_a = a.annual_repayment(salary);
                let repayment_b = b.annual_repayment(salary);

                let mut combined_marginal_rate = 0.0;
                if a.is_above_threshold(salary) {
                    combined_marginal_rate += a.rate;
                }
                if b.is_above_threshold(salary) {
                    combined_marginal_rate += b.rate;
                }

                CombinedYear {
                    year: scenario.start_year + offset as i32,
                    repayment_a,
                    repayment_b,
                    total_repayment: repayment_a + repayment_b,
                    combined_marginal_rate,
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(PlanRegistry::uk_published())
    }

    #[test]
    fn test_flat_salary_above_threshold() {
        // 30,000 on Plan 2 at 0% growth: (30000 - 27295) * 0.09 = 243.45/year
        let scenario = Scenario::new(30_000.0, 0.0, PlanId::Plan2, 2025);
        let rows = engine().project(&scenario).unwrap();

        assert_eq!(rows.len(), 10);
        for row in &rows {
            assert!(row.above_threshold);
            assert_relative_eq!(row.annual_repayment, 243.45, max_relative = 1e-12);
            assert_relative_eq!(row.monthly_repayment, 243.45 / 12.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_threshold_consistency() {
        let scenario = Scenario::with_horizon(20_000.0, 5.0, PlanId::Plan2, 2025, 15);
        let rows = engine().project(&scenario).unwrap();
        let threshold = 27_295.0;

        for row in &rows {
            assert_eq!(row.above_threshold, row.salary >= threshold);
            if !row.above_threshold {
                assert_eq!(row.annual_repayment, 0.0);
                assert!(row.distance_from_threshold < 0.0);
            }
        }
    }

    #[test]
    fn test_salary_monotone_under_positive_growth() {
        let scenario = Scenario::new(25_000.0, 3.0, PlanId::Plan2, 2025);
        let rows = engine().project(&scenario).unwrap();

        for pair in rows.windows(2) {
            assert!(pair[1].salary > pair[0].salary);
        }
    }

    #[test]
    fn test_negative_growth_does_not_fail() {
        let scenario = Scenario::new(40_000.0, -5.0, PlanId::Plan2, 2025);
        let rows = engine().project(&scenario).unwrap();

        assert_eq!(rows.len(), 10);
        assert!(rows.last().unwrap().salary < rows[0].salary);
    }

    #[test]
    fn test_project_is_deterministic() {
        let scenario = Scenario::new(23_456.78, 4.2, PlanId::Plan5, 2026);
        let first = engine().project(&scenario).unwrap();
        let second = engine().project(&scenario).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = Scenario::with_horizon(30_000.0, 0.0, PlanId::Plan2, 2025, 0);
        assert!(matches!(
            engine().project(&scenario),
            Err(EngineError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_combined_both_thresholds_exceeded() {
        // 40,000 against Plan 2 + Postgraduate:
        // (40000 - 27295) * 0.09 = 1143.45 and (40000 - 21000) * 0.06 = 1140
        let scenario = Scenario::new(40_000.0, 0.0, PlanId::Plan2, 2025);
        let rows = engine()
            .combine(&scenario, PlanId::Plan2, PlanId::Postgraduate)
            .unwrap();

        let row = &rows[0];
        assert_relative_eq!(row.repayment_a, 1_143.45, max_relative = 1e-12);
        assert_relative_eq!(row.repayment_b, 1_140.0, max_relative = 1e-12);
        assert_relative_eq!(row.total_repayment, 2_283.45, max_relative = 1e-12);
        assert_relative_eq!(row.combined_marginal_rate, 0.15, max_relative = 1e-12);
    }

    #[test]
    fn test_combined_marginal_rate_tracks_each_threshold() {
        // 22,000 growing at 10%: above the postgraduate threshold from the
        // start, crosses Plan 2's 27,295 later
        let scenario = Scenario::new(22_000.0, 10.0, PlanId::Plan2, 2025);
        let rows = engine()
            .combine(&scenario, PlanId::Plan2, PlanId::Postgraduate)
            .unwrap();

        assert_relative_eq!(rows[0].combined_marginal_rate, 0.06, max_relative = 1e-12);
        assert_eq!(rows[0].repayment_a, 0.0);
        assert!(rows[0].repayment_b > 0.0);

        let both = rows
            .iter()
            .find(|r| r.combined_marginal_rate > 0.06)
            .expect("salary should cross the second threshold within horizon");
        assert_relative_eq!(both.combined_marginal_rate, 0.15, max_relative = 1e-12);
    }

    #[test]
    fn test_combined_below_both_thresholds() {
        let scenario = Scenario::new(15_000.0, 0.0, PlanId::Plan2, 2025);
        let rows = engine()
            .combine(&scenario, PlanId::Plan2, PlanId::Postgraduate)
            .unwrap();

        for row in &rows {
            assert_eq!(row.total_repayment, 0.0);
            assert_eq!(row.combined_marginal_rate, 0.0);
        }
    }

    #[test]
    fn test_combined_additivity() {
        let scenario = Scenario::new(40_000.0, 2.0, PlanId::Plan2, 2025);
        let eng = engine();

        let combined = eng
            .combine(&scenario, PlanId::Plan2, PlanId::Postgraduate)
            .unwrap();
        let solo_a = eng.project(&scenario).unwrap();
        let mut scenario_b = scenario.clone();
        scenario_b.plan = PlanId::Postgraduate;
        let solo_b = eng.project(&scenario_b).unwrap();

        for ((c, a), b) in combined.iter().zip(&solo_a).zip(&solo_b) {
            assert_relative_eq!(
                c.total_repayment,
                a.annual_repayment + b.annual_repayment,
                max_relative = 1e-12
            );
        }
    }
}
