//! Probability forecast scores.
//!
//! Brier (1950); Wilks (1995), Statistical Methods in the Atmospheric
//! Sciences.

use skill_stats::mean_sq_diff;

use crate::error::MetricsError;
use crate::utils::check_pair;

/// Brier score `BS = sum((f - o)^2) / N`.
///
/// `forecast` holds probabilities in `[0, 1]`, `observed` holds outcomes
/// that are exactly 0 or 1.
///
/// # Errors
///
/// Returns [`MetricsError::DomainViolation`] if either input leaves its
/// domain, plus the usual shape/finiteness errors.
pub fn brier_score(forecast: &[f64], observed: &[f64]) -> Result<f64, MetricsError> {
    check_pair(forecast, "forecast", observed, "observed")?;
    check_probabilities(forecast, "forecast")?;
    check_outcomes(observed)?;
    Ok(mean_sq_diff(forecast, observed))
}

/// Brier skill score `BSS = 1 - BS / BS_ref`.
///
/// # Errors
///
/// Returns [`MetricsError::ZeroDenominator`] if the reference forecast is
/// perfect (its Brier score is zero).
pub fn skill_score_brier(
    forecast: &[f64],
    reference: &[f64],
    observed: &[f64],
) -> Result<f64, MetricsError> {
    check_pair(forecast, "forecast", reference, "reference")?;
    let bs = brier_score(forecast, observed)?;
    let bs_ref = brier_score(reference, observed)?;
    if bs_ref == 0.0 {
        return Err(MetricsError::ZeroDenominator {
            quantity: "reference Brier score",
        });
    }
    Ok(1.0 - bs / bs_ref)
}

fn check_probabilities(values: &[f64], input: &'static str) -> Result<(), MetricsError> {
    if values.iter().all(|&v| (0.0..=1.0).contains(&v)) {
        Ok(())
    } else {
        Err(MetricsError::DomainViolation {
            input,
            domain: "interval [0,1]",
        })
    }
}

fn check_outcomes(values: &[f64]) -> Result<(), MetricsError> {
    if values.iter().all(|&v| v == 0.0 || v == 1.0) {
        Ok(())
    } else {
        Err(MetricsError::DomainViolation {
            input: "observed",
            domain: "set {0,1}",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FORECAST: [f64; 10] = [0.7, 0.9, 0.8, 0.4, 0.2, 0.0, 0.0, 0.0, 0.0, 0.1];
    const REFERENCE: [f64; 10] = [0.9, 0.7, 0.6, 0.4, 0.2, 0.0, 0.0, 0.0, 0.0, 0.1];
    const OBSERVED: [f64; 10] = [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_brier_score_known_value() {
        // 0.09 + 0.01 + 0.04 + 0.36 + 0.64 + 0.81 = 1.95 -> /10
        assert_relative_eq!(brier_score(&FORECAST, &OBSERVED).unwrap(), 0.195, epsilon = 1e-12);
    }

    #[test]
    fn test_brier_score_perfect() {
        assert_eq!(brier_score(&OBSERVED, &OBSERVED).unwrap(), 0.0);
    }

    #[test]
    fn test_skill_score_brier_known_value() {
        // BS_ref: 0.01 + 0.09 + 0.16 + 0.36 + 0.64 + 0.81 = 2.07 -> 0.207
        let bss = skill_score_brier(&FORECAST, &REFERENCE, &OBSERVED).unwrap();
        assert_relative_eq!(bss, 1.0 - 0.195 / 0.207, epsilon = 1e-12);
    }

    #[test]
    fn test_brier_forecast_out_of_range() {
        let err = brier_score(&[1.2, 0.0], &[1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::DomainViolation {
                input: "forecast",
                domain: "interval [0,1]"
            }
        );
    }

    #[test]
    fn test_brier_observed_not_binary() {
        let err = brier_score(&[0.2, 0.4], &[0.5, 0.0]).unwrap_err();
        assert!(matches!(err, MetricsError::DomainViolation { input: "observed", .. }));
    }

    #[test]
    fn test_brier_length_mismatch() {
        let err = brier_score(&[0.2, 0.4, 0.1], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, MetricsError::LengthMismatch { left_len: 3, right_len: 2, .. }));
    }

    #[test]
    fn test_skill_score_brier_perfect_reference() {
        let err = skill_score_brier(&FORECAST, &OBSERVED, &OBSERVED).unwrap_err();
        assert!(matches!(err, MetricsError::ZeroDenominator { .. }));
    }
}
