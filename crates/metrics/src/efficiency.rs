//! Hydrological efficiencies: Nash-Sutcliffe and Kling-Gupta.

use skill_stats::{mean, pearson_correlation, population_sd, sum, sum_sq_dev};

use crate::error::MetricsError;
use crate::utils::check_arrays;

/// Scaling factors for the three KGE components.
///
/// | Field | Component |
/// |-------|-----------|
/// | `sr` | correlation |
/// | `s_variability` | alpha (KGE 2009) or gamma (KGE 2012) |
/// | `s_bias` | beta |
///
/// All default to 1.0; each must lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KgeWeights {
    sr: f64,
    s_variability: f64,
    s_bias: f64,
}

impl Default for KgeWeights {
    fn default() -> Self {
        Self {
            sr: 1.0,
            s_variability: 1.0,
            s_bias: 1.0,
        }
    }
}

impl KgeWeights {
    /// Sets the correlation weight.
    pub fn with_sr(mut self, sr: f64) -> Self {
        self.sr = sr;
        self
    }

    /// Sets the variability (alpha or gamma) weight.
    pub fn with_s_variability(mut self, s: f64) -> Self {
        self.s_variability = s;
        self
    }

    /// Sets the bias (beta) weight.
    pub fn with_s_bias(mut self, s: f64) -> Self {
        self.s_bias = s;
        self
    }

    /// Returns the correlation weight.
    pub fn sr(&self) -> f64 {
        self.sr
    }

    /// Returns the variability weight.
    pub fn s_variability(&self) -> f64 {
        self.s_variability
    }

    /// Returns the bias weight.
    pub fn s_bias(&self) -> f64 {
        self.s_bias
    }

    /// Validates that every weight lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), MetricsError> {
        for (name, value) in [
            ("sr", self.sr),
            ("s_variability", self.s_variability),
            ("s_bias", self.s_bias),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MetricsError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    fn combine(&self, cc: f64, variability: f64, beta: f64) -> f64 {
        let a = self.sr * (cc - 1.0);
        let b = self.s_variability * (variability - 1.0);
        let c = self.s_bias * (beta - 1.0);
        1.0 - (a * a + b * b + c * c).sqrt()
    }
}

/// Nash-Sutcliffe efficiency `1 - sum((p - r)^2) / sum((r - mean(r))^2)`.
///
/// Ranges from -inf to 1; 1 is a perfect match and 0 means the model is
/// no better than the reference mean.
///
/// # Errors
///
/// Returns [`MetricsError::ZeroVariance`] if the reference is constant.
pub fn nse(predicted: &[f64], reference: &[f64]) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    let denom = sum_sq_dev(reference);
    if denom == 0.0 {
        return Err(MetricsError::ZeroVariance { input: "reference" });
    }
    let num: f64 = predicted
        .iter()
        .zip(reference.iter())
        .map(|(p, r)| (p - r) * (p - r))
        .sum();
    Ok(1.0 - num / denom)
}

/// Kling-Gupta efficiency, Gupta et al. (2009).
///
/// `1 - sqrt((sr(cc-1))^2 + (sa(alpha-1))^2 + (sb(beta-1))^2)` with
/// `alpha = std(p) / std(r)` and `beta = sum(p) / sum(r)`. Standard
/// deviations are population (divide by N).
///
/// Returns negative infinity when `std(r) == 0` or `sum(r) == 0`.
pub fn kge09(predicted: &[f64], reference: &[f64], weights: &KgeWeights) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    weights.validate()?;

    let std_ref = population_sd(reference);
    let sum_ref = sum(reference);
    if std_ref == 0.0 || sum_ref == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    let alpha = population_sd(predicted) / std_ref;
    let beta = sum(predicted) / sum_ref;
    let cc = correlation(predicted, reference);
    Ok(weights.combine(cc, alpha, beta))
}

/// Kling-Gupta efficiency, Kling et al. (2012).
///
/// As [`kge09`] with `alpha` replaced by the ratio of coefficients of
/// variation `gamma = (std(p) / mean(p)) / (std(r) / mean(r))`.
///
/// Returns negative infinity when `std(r) == 0`, `sum(r) == 0` or
/// `mean(p) == 0`.
pub fn kge12(predicted: &[f64], reference: &[f64], weights: &KgeWeights) -> Result<f64, MetricsError> {
    check_arrays(predicted, reference)?;
    weights.validate()?;

    let std_ref = population_sd(reference);
    let sum_ref = sum(reference);
    if std_ref == 0.0 || sum_ref == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    let mean_pred = mean(predicted);
    if mean_pred == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    let cv_pred = population_sd(predicted) / mean_pred;
    let cv_ref = std_ref / mean(reference);
    let gamma = cv_pred / cv_ref;
    let beta = sum(predicted) / sum_ref;
    let cc = correlation(predicted, reference);
    Ok(weights.combine(cc, gamma, beta))
}

/// Pearson correlation, taken as 0 when the predicted series is constant.
///
/// The reference is known to vary by the time this is called.
pub(crate) fn correlation(predicted: &[f64], reference: &[f64]) -> f64 {
    pearson_correlation(predicted, reference).unwrap_or(0.0)
}
