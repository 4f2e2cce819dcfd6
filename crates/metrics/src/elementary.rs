//! Elementary pairwise statistics: bias, RMSD, centered RMSD, Murphy skill.
//!
//! Every function validates its inputs with [`check_arrays`] first, so a
//! length mismatch, an empty series or a non-finite value is always an error.

use skill_stats::{mean, mean_sq_diff, sample_sd};

use crate::error::MetricsError;
use crate::utils::check_arrays;

/// Bias `B = mean(p) - mean(r)`.
pub fn bias(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    Ok(mean(predicted) - mean(reference))
}

/// Percentage bias `BP = 100 * |(mean(p) - mean(r)) / mean(r)|`.
///
/// # Errors
///
/// Returns [`MetricsError::ZeroDenominator`] when the reference mean is zero.
pub fn bias_percent(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    let model = mean(predicted);
    let refm = mean(reference);
    if refm == 0.0 {
        return Err(MetricsError::ZeroDenominator {
            quantity: "mean(reference)",
        });
    }
    Ok(100.0 * ((model - refm) / refm).abs())
}

/// Root-mean-square deviation `sqrt(sum((p - r)^2) / N)`.
pub fn rmsd(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    Ok(mean_sq_diff(predicted, reference).sqrt())
}

/// Centered root-mean-square difference `E'`.
///
/// `(E')^2 = sum([(p_n - mean(p)) - (r_n - mean(r))]^2) / N`, i.e. the RMS
/// difference once each series has had its own mean removed.
pub fn centered_rms_dev(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    Ok(centered_rms_dev_unchecked(predicted, reference))
}

/// [`centered_rms_dev`] without input validation, for callers that already
/// ran the checks.
pub(crate) fn centered_rms_dev_unchecked(predicted: &[f64], reference: &[f64]) -> f64 {
    let pmean = mean(predicted);
    let rmean = mean(reference);
    let sum_sq: f64 = predicted
        .iter()
        .zip(reference.iter())
        .map(|(&p, &r)| {
            let d = (p - pmean) - (r - rmean);
            d * d
        })
        .sum();
    (sum_sq / predicted.len() as f64).sqrt()
}

/// Non-dimensional skill score of Murphy (1988): `SS = 1 - RMSD^2 / SDEV^2`.
///
/// `SDEV` is the sample standard deviation (N - 1) of the reference.
///
/// # Errors
///
/// Returns [`MetricsError::ZeroVariance`] when the reference is constant or
/// has a single value.
pub fn skill_score_murphy(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    let rmse2 = mean_sq_diff(predicted, reference);
    let sdev = sample_sd(reference);
    if sdev.is_nan() || sdev == 0.0 {
        return Err(MetricsError::ZeroVariance { input: "reference" });
    }
    Ok(1.0 - rmse2 / (sdev * sdev))
}
