//! Statistics Calculator Module
//! Handles descriptive statistics and independent two-sample t-tests.

use crate::error::{AnalysisError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for the recession comparison.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.01;

/// Statistics for a single group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
        }
    }
}

/// Outcome of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl TTestResult {
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_THRESHOLD
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample variance (n - 1 denominator).
    pub fn variance(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return 0.0;
        }
        let mean = Self::mean(values);
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(group_name: &str, values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats {
                group_name: group_name.to_string(),
                ..GroupStats::default()
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let variance = Self::variance(values);

        GroupStats {
            group_name: group_name.to_string(),
            count: n,
            mean: Self::mean(values),
            median,
            std: variance.sqrt(),
            variance,
        }
    }

    /// Student's t-test for independent samples with pooled variance.
    pub fn students_ttest(a: &[f64], b: &[f64]) -> Result<TTestResult> {
        let n1 = a.len() as f64;
        let n2 = b.len() as f64;
        let df = n1 + n2 - 2.0;
        if a.is_empty() || b.is_empty() || df < 1.0 {
            return Err(AnalysisError::DegenerateTest {
                total: a.len() + b.len(),
            });
        }

        let pooled = ((n1 - 1.0) * Self::variance(a) + (n2 - 1.0) * Self::variance(b)) / df;
        let se = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
        Self::two_tailed(Self::mean(a) - Self::mean(b), se, df, a.len() + b.len())
    }

    /// Two-tailed p-value of `mean_diff / se`. Non-finite inputs are a degenerate test.
    fn two_tailed(mean_diff: f64, se: f64, df: f64, total: usize) -> Result<TTestResult> {
        if !mean_diff.is_finite() || !se.is_finite() || !df.is_finite() {
            return Err(AnalysisError::DegenerateTest { total });
        }
        if se == 0.0 {
            return Ok(if mean_diff == 0.0 {
                TTestResult {
                    statistic: 0.0,
                    p_value: 1.0,
                }
            } else {
                TTestResult {
                    statistic: f64::INFINITY.copysign(mean_diff),
                    p_value: 0.0,
                }
            });
        }

        let t = mean_diff / se;
        let dist =
            StudentsT::new(0.0, 1.0, df).map_err(|_| AnalysisError::DegenerateTest { total })?;
        Ok(TTestResult {
            statistic: t,
            p_value: 2.0 * dist.sf(t.abs()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn descriptive_stats_of_small_sample() {
        let gs = StatsCalculator::compute_descriptive_stats("uni", &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(gs.count, 4);
        assert!(close(gs.mean, 2.5));
        assert!(close(gs.median, 2.5));
        assert!(close(gs.variance, 5.0 / 3.0));
    }

    #[test]
    fn empty_group_has_nan_mean() {
        let gs = StatsCalculator::compute_descriptive_stats("none", &[]);
        assert_eq!(gs.count, 0);
        assert!(gs.mean.is_nan());
    }

    #[test]
    fn students_ttest_matches_reference() {
        // scipy.stats.ttest_ind([1, 2, 3, 4, 5], [2, 4, 6, 8, 10])
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = StatsCalculator::students_ttest(&a, &b).unwrap();
        assert!(close(r.statistic, -1.8973665961010275));
        assert!((r.p_value - 0.0943497).abs() < 1e-4);
        assert!(!r.is_significant());
    }

    #[test]
    fn identical_constant_samples_are_not_different() {
        let r = StatsCalculator::students_ttest(&[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_eq!(r.p_value, 1.0);
    }

    #[test]
    fn single_observation_per_group_is_degenerate() {
        assert!(matches!(
            StatsCalculator::students_ttest(&[1.0], &[2.0]),
            Err(AnalysisError::DegenerateTest { total: 2 })
        ));
    }

    #[test]
    fn non_finite_sample_is_degenerate() {
        let err = StatsCalculator::students_ttest(&[f64::NAN, -0.1], &[-0.2, -0.3]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateTest { total: 4 }));
        let err =
            StatsCalculator::students_ttest(&[f64::INFINITY, -0.1], &[-0.2, -0.3]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateTest { total: 4 }));
    }
}
