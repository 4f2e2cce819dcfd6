//! Shared input checks.

use crate::error::MetricsError;

/// Check that predicted and reference series can be compared pairwise.
///
/// Both must have the same length, be non-empty and contain only finite
/// values. Length is checked first so that a mismatch is always reported
/// with both shapes.
pub fn check_arrays(predicted: &[f64], reference: &[f64]) -> Result<(), MetricsError> {
    if predicted.len() != reference.len() {
        return Err(MetricsError::DimensionMismatch {
            predicted: predicted.len(),
            reference: reference.len(),
        });
    }
    check_values(predicted, "predicted", reference, "reference")
}

/// Same as [`check_arrays`] for inputs that are not a predicted/reference
/// pair (forecast probabilities, statistic arrays).
pub(crate) fn check_pair(
    a: &[f64],
    a_name: &'static str,
    b: &[f64],
    b_name: &'static str,
) -> Result<(), MetricsError> {
    if a.len() != b.len() {
        return Err(MetricsError::LengthMismatch {
            left: a_name,
            left_len: a.len(),
            right: b_name,
            right_len: b.len(),
        });
    }
    check_values(a, a_name, b, b_name)
}

fn check_values(
    a: &[f64],
    a_name: &'static str,
    b: &[f64],
    b_name: &'static str,
) -> Result<(), MetricsError> {
    if a.is_empty() {
        return Err(MetricsError::EmptyInput { input: a_name });
    }
    check_finite(a, a_name)?;
    check_finite(b, b_name)
}

/// Reject NaN and infinite values.
pub(crate) fn check_finite(data: &[f64], input: &'static str) -> Result<(), MetricsError> {
    if data.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MetricsError::NonFiniteInput { input })
    }
}
