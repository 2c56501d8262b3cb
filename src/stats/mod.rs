//! Sample aggregation for the statistics pipeline
//!
//! Percentiles use a nearest-rank estimator: `sorted[floor(N * p) - 1]`,
//! zero-based after the `-1` adjustment, not interpolated. This differs from
//! some conventional percentile definitions; for N=1 the raw index would be
//! `floor(0.5) - 1 = -1`, so the index is clamped to 0.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Append-only collection of numeric samples, one per audit run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    values: Vec<f64>,
}

/// Aggregated statistics over a sorted sample set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Middle element (odd N) or mean of the two central elements (even N)
    pub median: f64,
    /// Nearest-rank 50th percentile
    pub p50: f64,
    /// Nearest-rank 90th percentile
    pub p90: f64,
    /// All samples, ascending
    pub samples: Vec<f64>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sort destructively, then extract median and tail percentiles.
    ///
    /// Consumes the set: the samples are not meaningful in collection order
    /// once the aggregation has run.
    pub fn summarize(mut self) -> Result<SampleSummary> {
        if self.values.is_empty() {
            return Err(AppError::statistics(
                "Cannot summarize an empty sample set",
            ));
        }

        self.values
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Ok(SampleSummary {
            median: median_of_sorted(&self.values),
            p50: nearest_rank(&self.values, 0.5),
            p90: nearest_rank(&self.values, 0.9),
            samples: self.values,
        })
    }
}

impl SampleSummary {
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

/// Median of an ascending slice: middle element, or mean of the two central
/// elements when the length is even
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Nearest-rank percentile: `sorted[floor(N * p) - 1]`, index clamped to 0
/// so that single-sample sets do not index out of bounds
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let index = ((n as f64 * p).floor() as isize - 1).max(0) as usize;
    sorted[index.min(n - 1)]
}
