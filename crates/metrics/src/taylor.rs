//! Statistics for Taylor diagrams (Taylor, 2001).
//!
//! Every Taylor statistic array is indexed the same way: entry 0 belongs to
//! the reference series, entries 1.. to the predicted series.

use serde::Serialize;
use skill_stats::population_sd;
use tracing::debug;

use crate::efficiency::correlation;
use crate::elementary::centered_rms_dev_unchecked;
use crate::error::MetricsError;
use crate::input::{SeriesInput, error_check_stats};
use crate::utils::check_finite;

/// Default relative tolerance for [`check_taylor_stats`].
pub const TAYLOR_THRESHOLD: f64 = 0.01;

/// Smallest threshold accepted by the consistency checks.
pub(crate) const MIN_THRESHOLD: f64 = 1e-7;

/// Relative rounding floor of the Taylor relation, scaled by
/// `STD_i^2 + STD_0^2`.
const ROUNDING_FLOOR: f64 = 1e-12;

/// Correlation, centered RMSD and standard deviation of one predicted
/// series and its reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaylorStats {
    /// `[1.0, R]`: the reference correlates perfectly with itself.
    pub ccoef: [f64; 2],
    /// `[0.0, E']`: the reference has no centered difference from itself.
    pub crmsd: [f64; 2],
    /// `[sigma_ref, sigma_pred]`, population standard deviations.
    pub sdev: [f64; 2],
}

impl TaylorStats {
    /// Correlation of the predicted series with the reference.
    pub fn correlation(&self) -> f64 {
        self.ccoef[1]
    }

    /// Standard deviation of the reference series.
    pub fn reference_sdev(&self) -> f64 {
        self.sdev[0]
    }
}

/// Compute Taylor diagram statistics.
///
/// A constant predicted series has an undefined correlation; it is
/// reported as 0, which leaves the Taylor relation exact because its
/// standard deviation is 0 as well.
///
/// # Errors
///
/// Field lookup, shape and finiteness errors from [`error_check_stats`];
/// [`MetricsError::ZeroVariance`] when the reference is constant.
pub fn taylor_statistics<'a>(
    predicted: impl Into<SeriesInput<'a>>,
    reference: impl Into<SeriesInput<'a>>,
    field: Option<&str>,
) -> Result<TaylorStats, MetricsError> {
    let (p, r) = error_check_stats(predicted.into(), reference.into(), field)?;

    let sdevr = population_sd(r);
    if sdevr == 0.0 {
        return Err(MetricsError::ZeroVariance { input: "reference" });
    }
    let sdevp = population_sd(p);
    let ccoef = correlation(p, r);
    let crmsd = centered_rms_dev_unchecked(p, r);

    debug!(ccoef, crmsd, sdevr, sdevp, "taylor statistics");
    Ok(TaylorStats {
        ccoef: [1.0, ccoef],
        crmsd: [0.0, crmsd],
        sdev: [sdevr, sdevp],
    })
}

/// Check that Taylor statistics satisfy
/// `CRMSD_i^2 = STD_i^2 + STD_0^2 - 2 STD_0 STD_i COR_i` for every `i >= 1`.
///
/// The relative difference `|lhs - rhs| / CRMSD_i^2` must not exceed
/// `threshold` (e.g. 0.01 for 1%). The denominator never drops below
/// `1e-12 * (STD_i^2 + STD_0^2)`, the rounding error of the right-hand
/// side, so near-identical series with a tiny `CRMSD_i` pass. Entries whose
/// denominator is still 0 are judged on the absolute difference. Returns
/// the per-entry differences, one per predicted series.
///
/// # Errors
///
/// [`MetricsError::InvalidThreshold`] for thresholds below 1e-7,
/// [`MetricsError::LengthMismatch`] for arrays of different length, and
/// [`MetricsError::TaylorRelation`] naming every offending index.
pub fn check_taylor_stats(
    stds: &[f64],
    crmsds: &[f64],
    cors: &[f64],
    threshold: f64,
) -> Result<Vec<f64>, MetricsError> {
    if threshold.is_nan() || threshold < MIN_THRESHOLD {
        return Err(MetricsError::InvalidThreshold { threshold });
    }
    check_lengths(stds, crmsds, cors)?;
    check_finite(stds, "stds")?;
    check_finite(crmsds, "crmsds")?;
    check_finite(cors, "cors")?;

    let std_ref = stds[0];
    let mut diffs = Vec::with_capacity(stds.len() - 1);
    let mut offending = Vec::new();
    for i in 1..stds.len() {
        let lhs = crmsds[i] * crmsds[i];
        let rhs = stds[i] * stds[i] + std_ref * std_ref - 2.0 * std_ref * stds[i] * cors[i];
        let scale = lhs.max(ROUNDING_FLOOR * (stds[i] * stds[i] + std_ref * std_ref));
        let diff = if scale == 0.0 {
            (lhs - rhs).abs()
        } else {
            (lhs - rhs).abs() / scale
        };
        if diff > threshold {
            offending.push(i);
        }
        diffs.push(diff);
    }

    if !offending.is_empty() {
        return Err(MetricsError::TaylorRelation { indices: offending });
    }
    Ok(diffs)
}

fn check_lengths(stds: &[f64], crmsds: &[f64], cors: &[f64]) -> Result<(), MetricsError> {
    if stds.is_empty() {
        return Err(MetricsError::EmptyInput { input: "stds" });
    }
    for (name, arr) in [("crmsds", crmsds), ("cors", cors)] {
        if arr.len() != stds.len() {
            return Err(MetricsError::LengthMismatch {
                left: "stds",
                left_len: stds.len(),
                right: name,
                right_len: arr.len(),
            });
        }
    }
    Ok(())
}

/// Taylor statistics of several models against one reference, laid out as
/// the arrays a Taylor diagram takes: entry 0 is the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaylorSeries {
    /// Standard deviations.
    pub sdev: Vec<f64>,
    /// Centered RMS differences.
    pub crmsd: Vec<f64>,
    /// Correlation coefficients.
    pub ccoef: Vec<f64>,
}

impl TaylorSeries {
    /// Starts a collection from the first model; its reference entries
    /// become index 0.
    pub fn new(first: &TaylorStats) -> Self {
        Self {
            sdev: first.sdev.to_vec(),
            crmsd: first.crmsd.to_vec(),
            ccoef: first.ccoef.to_vec(),
        }
    }

    /// Appends another model's predicted entries.
    pub fn push(&mut self, stats: &TaylorStats) {
        self.sdev.push(stats.sdev[1]);
        self.crmsd.push(stats.crmsd[1]);
        self.ccoef.push(stats.ccoef[1]);
    }

    /// Number of entries including the reference.
    pub fn len(&self) -> usize {
        self.sdev.len()
    }

    /// Always `false`: a collection holds at least the reference.
    pub fn is_empty(&self) -> bool {
        self.sdev.is_empty()
    }

    /// Runs [`check_taylor_stats`] on the collected arrays.
    pub fn check(&self, threshold: f64) -> Result<Vec<f64>, MetricsError> {
        check_taylor_stats(&self.sdev, &self.crmsd, &self.ccoef, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REF: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_taylor_statistics_layout() {
        let p = [3.0, 4.5, 3.0, 5.0, 6.0, 4.0, 8.0, 8.5];
        let stats = taylor_statistics(&p, &REF, None).unwrap();
        assert_eq!(stats.ccoef[0], 1.0);
        assert_eq!(stats.crmsd[0], 0.0);
        assert_relative_eq!(stats.sdev[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(stats.reference_sdev(), 2.0, epsilon = 1e-12);
        assert!(stats.correlation() > 0.8);
    }

    #[test]
    fn test_taylor_statistics_identical() {
        let stats = taylor_statistics(&REF, &REF, None).unwrap();
        assert_relative_eq!(stats.ccoef[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(stats.crmsd[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(stats.sdev[1], stats.sdev[0], epsilon = 1e-12);
    }

    #[test]
    fn test_taylor_statistics_constant_reference() {
        let err = taylor_statistics(&[1.0, 2.0], &[4.0, 4.0], None).unwrap_err();
        assert_eq!(err, MetricsError::ZeroVariance { input: "reference" });
    }

    #[test]
    fn test_taylor_statistics_constant_prediction() {
        let stats = taylor_statistics(&[3.0; 8], &REF, None).unwrap();
        assert_eq!(stats.ccoef[1], 0.0);
        assert_eq!(stats.sdev[1], 0.0);
        assert_relative_eq!(stats.crmsd[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_check_taylor_stats_passes_for_computed_stats() {
        let p = [1.0, 5.0, 2.0, 6.0, 5.5, 3.0, 9.0, 7.0];
        let stats = taylor_statistics(&p, &REF, None).unwrap();
        let diffs = check_taylor_stats(&stats.sdev, &stats.crmsd, &stats.ccoef, TAYLOR_THRESHOLD)
            .unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0] < 1e-10);
    }

    #[test]
    fn test_check_taylor_stats_reports_offending_indices() {
        // Entry 1 consistent (3-4-5 with cor 0), entry 2 not.
        let stds = [3.0, 4.0, 4.0];
        let crmsds = [0.0, 5.0, 1.0];
        let cors = [1.0, 0.0, 0.0];
        let err = check_taylor_stats(&stds, &crmsds, &cors, 0.01).unwrap_err();
        assert_eq!(err, MetricsError::TaylorRelation { indices: vec![2] });
    }

    #[test]
    fn test_check_taylor_stats_tiny_crmsd_within_rounding() {
        // crmsd 7.1e-8 at sdev 7: CRMSD^2 sits below the rounding error of
        // the right-hand side, which vanishes with the correlation at 1.
        let stds = [7.002769851, 7.002769849];
        let crmsds = [0.0, 7.1e-8];
        let cors = [1.0, 1.0];
        let diffs = check_taylor_stats(&stds, &crmsds, &cors, TAYLOR_THRESHOLD).unwrap();
        assert!(diffs[0] < TAYLOR_THRESHOLD);
    }

    #[test]
    fn test_check_taylor_stats_zero_crmsd_with_distinct_sdev_fails() {
        let err = check_taylor_stats(&[1.0, 2.0], &[0.0, 0.0], &[1.0, 1.0], 0.01).unwrap_err();
        assert_eq!(err, MetricsError::TaylorRelation { indices: vec![1] });
    }

    #[test]
    fn test_check_taylor_stats_invalid_threshold() {
        let err = check_taylor_stats(&[1.0], &[0.0], &[1.0], 0.0).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidThreshold { .. }));
        let err = check_taylor_stats(&[1.0], &[0.0], &[1.0], f64::NAN).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_check_taylor_stats_length_mismatch() {
        let err = check_taylor_stats(&[1.0, 2.0], &[0.0], &[1.0, 0.5], 0.01).unwrap_err();
        assert!(matches!(err, MetricsError::LengthMismatch { right: "crmsds", .. }));
    }

    #[test]
    fn test_check_taylor_stats_reference_only() {
        assert!(check_taylor_stats(&[1.0], &[0.0], &[1.0], 0.01).unwrap().is_empty());
    }

    #[test]
    fn test_taylor_series_collects_reference_once() {
        let a = taylor_statistics(&[1.0, 5.0, 2.0, 6.0, 5.5, 3.0, 9.0, 7.0], &REF, None).unwrap();
        let b = taylor_statistics(&[2.0, 3.0, 4.0, 5.0, 4.0, 6.0, 6.0, 8.0], &REF, None).unwrap();
        let mut series = TaylorSeries::new(&a);
        series.push(&b);
        assert_eq!(series.len(), 3);
        assert_eq!(series.sdev[0], a.sdev[0]);
        assert_eq!(series.ccoef, vec![1.0, a.ccoef[1], b.ccoef[1]]);
        assert!(series.check(TAYLOR_THRESHOLD).is_ok());
    }
}
