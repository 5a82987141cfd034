//! Recession Detector Module
//! Finds recessions in the GDP series with a fixed-window monotonicity rule.

use crate::model::{GdpSeries, RecessionInterval};
use tracing::debug;

/// Consecutive strict declines that open a recession.
pub const DECLINE_WINDOW: usize = 2;
/// Consecutive strict increases that close a recession.
pub const RISE_WINDOW: usize = 4;

pub struct RecessionDetector;

impl RecessionDetector {
    /// True when the `window` steps ending at `i` are all strict declines.
    pub fn is_candidate_start(values: &[f64], i: usize) -> bool {
        Self::strict_run(values, i, DECLINE_WINDOW, |prev, cur| cur < prev)
    }

    /// True when the `window` steps ending at `i` are all strict increases.
    pub fn is_candidate_end(values: &[f64], i: usize) -> bool {
        Self::strict_run(values, i, RISE_WINDOW, |prev, cur| cur > prev)
    }

    fn strict_run(values: &[f64], i: usize, window: usize, step: fn(f64, f64) -> bool) -> bool {
        i >= window && i < values.len() && (i - window..i).all(|j| step(values[j], values[j + 1]))
    }

    /// Recession index triples (start, bottom, end), in order of start.
    pub fn detect_indices(values: &[f64]) -> Vec<(usize, usize, usize)> {
        let mut intervals = Vec::new();
        let mut open: Option<usize> = None;

        for i in 0..values.len() {
            match open {
                None if Self::is_candidate_start(values, i) => open = Some(i),
                Some(start) if Self::is_candidate_end(values, i) => {
                    intervals.push((start, Self::argmin(values, start, i), i));
                    open = None;
                }
                _ => {}
            }
        }

        if let Some(start) = open {
            debug!(start, "recession without a recovery dropped");
        }
        intervals
    }

    /// Recessions of a GDP series as quarter triples.
    pub fn detect(series: &GdpSeries) -> Vec<RecessionInterval> {
        let intervals: Vec<RecessionInterval> = Self::detect_indices(&series.values)
            .into_iter()
            .map(|(start, bottom, end)| RecessionInterval {
                start: series.periods[start],
                bottom: series.periods[bottom],
                end: series.periods[end],
            })
            .collect();
        debug!(recessions = intervals.len(), "detected recessions");
        intervals
    }

    /// Index of the first minimum in `values[from..to]`.
    fn argmin(values: &[f64], from: usize, to: usize) -> usize {
        (from..to).fold(from, |best, j| if values[j] < values[best] { j } else { best })
    }
}
