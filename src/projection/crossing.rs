//! Threshold-crossing detection over a repayment projection

use serde::{Deserialize, Serialize};

use super::schedule::YearProjection;

/// Summary of when a below-threshold salary is projected to start repaying
///
/// The month figure is a linear-interpolation estimate between two annually
/// compounded salary points, rounded up to whole months. Actual Student Loans
/// Company billing works at finer granularity; treat this as an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCrossing {
    /// Whether the first projected year sits below the threshold
    pub below_threshold_initially: bool,

    /// Calendar year the salary first reaches the threshold
    pub year_reached: Option<i32>,

    /// Projected salary in the crossing year
    pub salary_at_crossing: Option<f64>,

    /// Whole-year offset of the crossing from the start
    pub years_until_crossing: Option<u32>,

    /// Estimated months from the start until repayments begin, rounded up
    pub months_until_crossing: Option<u32>,
}

impl ThresholdCrossing {
    fn not_applicable(below_threshold_initially: bool) -> Self {
        Self {
            below_threshold_initially,
            year_reached: None,
            salary_at_crossing: None,
            years_until_crossing: None,
            months_until_crossing: None,
        }
    }
}

/// Find the first year a projection flips from below to at-or-above threshold
///
/// Crossing only applies to scenarios that start below the threshold: if the
/// first row is already above, no crossing is reported. A projection that
/// never crosses within its horizon yields all-`None` crossing fields, which
/// is a valid "no crossing predicted" result, not an error.
pub fn detect_crossing(projection: &[YearProjection]) -> ThresholdCrossing {
    let first_above = projection.iter().position(|r| r.above_threshold);

    let crossing_offset = match first_above {
        // Never crosses within the horizon
        None => return ThresholdCrossing::not_applicable(!projection.is_empty()),
        // Already at or above threshold in the first projected year
        Some(0) => {
            return ThresholdCrossing::not_applicable(false);
        }
        Some(i) => i,
    };

    let prev = &projection[crossing_offset - 1];
    let row = &projection[crossing_offset];
    let threshold = row.salary - row.distance_from_threshold;

    // Linear interpolation within the crossing year, clamped, months rounded
    // up so the repayment start is never understated
    let span = row.salary - prev.salary;
    let frac = if span > 0.0 {
        ((threshold - prev.salary) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let months = (((crossing_offset - 1) as f64 + frac) * 12.0).ceil() as u32;

    ThresholdCrossing {
        below_threshold_initially: true,
        year_reached: Some(row.year),
        salary_at_crossing: Some(row.salary),
        years_until_crossing: Some(crossing_offset as u32),
        months_until_crossing: Some(months),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::{PlanId, PlanRegistry};
    use crate::projection::ProjectionEngine;
    use crate::scenario::Scenario;
    use approx::assert_relative_eq;

    fn project(salary: f64, growth: f64, horizon: u32) -> Vec<YearProjection> {
        let engine = ProjectionEngine::new(PlanRegistry::uk_published());
        let scenario = Scenario::with_horizon(salary, growth, PlanId::Plan2, 2025, horizon);
        engine.project(&scenario).unwrap()
    }

    #[test]
    fn test_crossing_detected() {
        // 20,000 at 5% against 27,295: 20000 * 1.05^7 = 28,142.01 is the first
        // compounded value at or above the threshold
        let rows = project(20_000.0, 5.0, 10);
        let crossing = detect_crossing(&rows);

        assert!(crossing.below_threshold_initially);
        assert_eq!(crossing.year_reached, Some(2032));
        assert_eq!(crossing.years_until_crossing, Some(7));
        assert_relative_eq!(
            crossing.salary_at_crossing.unwrap(),
            28_142.008453125,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_crossing_month_interpolation() {
        // Crossing between offsets 6 and 7: salaries 26,801.91 and 28,142.01,
        // frac = (27295 - 26801.91) / 1340.10 = 0.3679 -> ceil(76.42) = 77
        let rows = project(20_000.0, 5.0, 10);
        let crossing = detect_crossing(&rows);
        assert_eq!(crossing.months_until_crossing, Some(77));
    }

    #[test]
    fn test_crossing_in_first_growth_year() {
        // 27,000 at 5%: crosses between offsets 0 and 1,
        // frac = 295 / 1350 = 0.2185 -> ceil(2.62) = 3 months
        let rows = project(27_000.0, 5.0, 5);
        let crossing = detect_crossing(&rows);

        assert_eq!(crossing.years_until_crossing, Some(1));
        assert_eq!(crossing.months_until_crossing, Some(3));
        assert_eq!(crossing.year_reached, Some(2026));
    }

    #[test]
    fn test_already_above_threshold_reports_no_crossing() {
        let rows = project(30_000.0, 0.0, 10);
        let crossing = detect_crossing(&rows);

        assert!(!crossing.below_threshold_initially);
        assert_eq!(crossing.year_reached, None);
        assert_eq!(crossing.months_until_crossing, None);
    }

    #[test]
    fn test_exactly_at_threshold_counts_as_above() {
        let rows = project(27_295.0, 0.0, 5);
        let crossing = detect_crossing(&rows);
        assert!(!crossing.below_threshold_initially);
        assert_eq!(crossing.year_reached, None);
    }

    #[test]
    fn test_no_crossing_within_horizon() {
        let rows = project(20_000.0, 0.0, 10);
        let crossing = detect_crossing(&rows);

        assert!(crossing.below_threshold_initially);
        assert_eq!(crossing.year_reached, None);
        assert_eq!(crossing.salary_at_crossing, None);
        assert_eq!(crossing.years_until_crossing, None);
        assert_eq!(crossing.months_until_crossing, None);
    }

    #[test]
    fn test_declining_salary_never_crosses() {
        let rows = project(25_000.0, -3.0, 10);
        let crossing = detect_crossing(&rows);
        assert!(crossing.below_threshold_initially);
        assert_eq!(crossing.year_reached, None);
    }
}
