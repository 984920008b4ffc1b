//! Projection output structures

use serde::{Deserialize, Serialize};

/// One computed row of a repayment projection
///
/// Rows are produced in order, immutable once produced, indexed by offset from
/// the scenario's start year. Money values are exact; rounding to whole pounds
/// is a presentation concern and never feeds back into later years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    /// Calendar year
    pub year: i32,

    /// Salary in that year, compounded annually from the current salary
    pub salary: f64,

    /// Whether the salary sits at or above the plan threshold
    pub above_threshold: bool,

    /// Annual deduction: max(0, salary - threshold) * rate
    pub annual_repayment: f64,

    /// Annual deduction spread over twelve months
    pub monthly_repayment: f64,

    /// Signed distance of the salary from the threshold
    pub distance_from_threshold: f64,
}

/// Complete repayment projection for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Plan the projection ran under
    pub plan_name: String,

    /// Per-year rows, ordered from the start year
    pub years: Vec<YearProjection>,
}

impl ProjectionResult {
    pub fn new(plan_name: impl Into<String>) -> Self {
        Self {
            plan_name: plan_name.into(),
            years: Vec::new(),
        }
    }

    /// Add a projection row
    pub fn add_row(&mut self, row: YearProjection) {
        self.years.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_repaid: f64 = self.years.iter().map(|r| r.annual_repayment).sum();
        let years_above_threshold = self.years.iter().filter(|r| r.above_threshold).count() as u32;
        let first_salary = self.years.first().map(|r| r.salary).unwrap_or(0.0);
        let final_salary = self.years.last().map(|r| r.salary).unwrap_or(0.0);

        ProjectionSummary {
            horizon_years: self.years.len() as u32,
            total_repaid,
            years_above_threshold,
            first_salary,
            final_salary,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub horizon_years: u32,
    pub total_repaid: f64,
    pub years_above_threshold: u32,
    pub first_salary: f64,
    pub final_salary: f64,
}

/// One year of a combined two-loan projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedYear {
    /// Calendar year
    pub year: i32,

    /// Repayment due under the first plan
    pub repayment_a: f64,

    /// Repayment due under the second plan
    pub repayment_b: f64,

    /// Sum of both deductions
    pub total_repayment: f64,

    /// Sum of the plan rates whose thresholds the salary exceeds that year
    pub combined_marginal_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let mut result = ProjectionResult::new("Plan 2");
        result.add_row(YearProjection {
            year: 2025,
            salary: 26_000.0,
            above_threshold: false,
            annual_repayment: 0.0,
            monthly_repayment: 0.0,
            distance_from_threshold: -1_295.0,
        });
        result.add_row(YearProjection {
            year: 2026,
            salary: 28_295.0,
            above_threshold: true,
            annual_repayment: 90.0,
            monthly_repayment: 7.5,
            distance_from_threshold: 1_000.0,
        });

        let summary = result.summary();
        assert_eq!(summary.horizon_years, 2);
        assert_eq!(summary.years_above_threshold, 1);
        assert!((summary.total_repaid - 90.0).abs() < 1e-12);
        assert_eq!(summary.final_salary, 28_295.0);
    }
}
