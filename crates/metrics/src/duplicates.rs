//! Detection of statistics pairs that would plot on top of each other.

use std::fmt;

use tracing::warn;

use crate::error::MetricsError;
use crate::taylor::MIN_THRESHOLD;

/// Two entries whose paired statistics agree within the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicatePair {
    /// Index of the first entry.
    pub i: usize,
    /// Index of the second entry (`j > i`).
    pub j: usize,
    /// `(stats1[i], stats2[i])`.
    pub first: (f64, f64),
    /// `(stats1[j], stats2[j])`.
    pub second: (f64, f64),
}

impl fmt::Display for DuplicatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, ({}, {}), ({}, {}))",
            self.i, self.j, self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// Find index pairs whose two statistics both agree to within `threshold`.
///
/// `stats1` and `stats2` are parallel arrays, e.g. standard deviations and
/// centered RMS differences. Differences are relative to the entry at `i`;
/// where that entry is zero the absolute difference is used.
///
/// # Errors
///
/// [`MetricsError::InvalidThreshold`] for thresholds below 1e-7,
/// [`MetricsError::EmptyInput`] and [`MetricsError::LengthMismatch`].
pub fn check_duplicate_stats(
    stats1: &[f64],
    stats2: &[f64],
    threshold: f64,
) -> Result<Vec<DuplicatePair>, MetricsError> {
    if threshold.is_nan() || threshold < MIN_THRESHOLD {
        return Err(MetricsError::InvalidThreshold { threshold });
    }
    if stats1.is_empty() {
        return Err(MetricsError::EmptyInput { input: "stats1" });
    }
    if stats2.is_empty() {
        return Err(MetricsError::EmptyInput { input: "stats2" });
    }
    if stats1.len() != stats2.len() {
        return Err(MetricsError::LengthMismatch {
            left: "stats1",
            left_len: stats1.len(),
            right: "stats2",
            right_len: stats2.len(),
        });
    }

    let n = stats1.len();
    let mut duplicates = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let diff1 = relative_diff(stats1[i], stats1[j]);
            let diff2 = relative_diff(stats2[i], stats2[j]);
            if diff1 < threshold && diff2 < threshold {
                duplicates.push(DuplicatePair {
                    i,
                    j,
                    first: (stats1[i], stats2[i]),
                    second: (stats1[j], stats2[j]),
                });
            }
        }
    }
    Ok(duplicates)
}

fn relative_diff(base: f64, other: f64) -> f64 {
    if base == 0.0 {
        (base - other).abs()
    } else {
        ((base - other) / base).abs()
    }
}

/// Log every duplicate pair at `warn` and return the report lines.
///
/// Returns an empty report when there are no duplicates.
pub fn report_duplicate_stats(duplicates: &[DuplicatePair]) -> Vec<String> {
    if duplicates.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(duplicates.len() + 1);
    lines.push("Duplicate pairs of statistics:".to_string());
    for pair in duplicates {
        warn!(i = pair.i, j = pair.j, "duplicate statistics {pair}");
        lines.push(pair.to_string());
    }
    lines
}
