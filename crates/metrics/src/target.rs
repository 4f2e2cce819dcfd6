//! Statistics for target diagrams (Jolliff et al., 2009).

use serde::Serialize;
use skill_stats::{mean, mean_sq_diff, population_sd};
use tracing::debug;

use crate::elementary::centered_rms_dev_unchecked;
use crate::error::MetricsError;
use crate::input::{SeriesInput, error_check_stats};

/// Whether target statistics were scaled by the reference spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsKind {
    /// Divided by the population standard deviation of the reference.
    Normalized,
    /// In the units of the data.
    Unnormalized,
}

/// Bias, centered RMSD and total RMSD of one predicted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetStats {
    /// Bias `mean(p) - mean(r)`.
    pub bias: f64,
    /// Centered (unbiased) RMS difference.
    pub crmsd: f64,
    /// Total RMS difference; `rmsd^2 = bias^2 + crmsd^2`.
    pub rmsd: f64,
    /// Normalisation applied.
    #[serde(rename = "type")]
    pub kind: StatsKind,
}

/// Compute target diagram statistics.
///
/// `predicted` and `reference` may each be raw values or a [`FieldSet`]
/// (then `field` selects the series). With `normalize`, all three
/// statistics are divided by the population standard deviation of the
/// reference.
///
/// # Errors
///
/// Field lookup, shape and finiteness errors from [`error_check_stats`];
/// [`MetricsError::ZeroVariance`] when normalising a constant reference.
///
/// [`FieldSet`]: crate::FieldSet
pub fn target_statistics<'a>(
    predicted: impl Into<SeriesInput<'a>>,
    reference: impl Into<SeriesInput<'a>>,
    field: Option<&str>,
    normalize: bool,
) -> Result<TargetStats, MetricsError> {
    let (p, r) = error_check_stats(predicted.into(), reference.into(), field)?;

    let mut bias = mean(p) - mean(r);
    let mut crmsd = centered_rms_dev_unchecked(p, r);
    let mut rmsd = mean_sq_diff(p, r).sqrt();

    let kind = if normalize {
        let sigma_ref = population_sd(r);
        if sigma_ref == 0.0 {
            return Err(MetricsError::ZeroVariance { input: "reference" });
        }
        bias /= sigma_ref;
        crmsd /= sigma_ref;
        rmsd /= sigma_ref;
        StatsKind::Normalized
    } else {
        StatsKind::Unnormalized
    };

    debug!(bias, crmsd, rmsd, ?kind, "target statistics");
    Ok(TargetStats {
        bias,
        crmsd,
        rmsd,
        kind,
    })
}

/// Target statistics of several models, laid out as the parallel arrays a
/// target diagram takes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetSeries {
    /// Biases, one per model.
    pub bias: Vec<f64>,
    /// Centered RMS differences, one per model.
    pub crmsd: Vec<f64>,
    /// Total RMS differences, one per model.
    pub rmsd: Vec<f64>,
}

impl TargetSeries {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one model's statistics.
    pub fn push(&mut self, stats: &TargetStats) {
        self.bias.push(stats.bias);
        self.crmsd.push(stats.crmsd);
        self.rmsd.push(stats.rmsd);
    }

    /// Number of models collected.
    pub fn len(&self) -> usize {
        self.bias.len()
    }

    /// Returns `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.bias.is_empty()
    }
}

impl<'s> FromIterator<&'s TargetStats> for TargetSeries {
    fn from_iter<I: IntoIterator<Item = &'s TargetStats>>(iter: I) -> Self {
        let mut series = Self::new();
        for stats in iter {
            series.push(stats);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FieldSet;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_statistics_values() {
        let r = [1.0, 2.0, 3.0, 4.0];
        let p = [2.0, 3.0, 5.0, 4.0];
        let stats = target_statistics(&p, &r, None, false).unwrap();
        assert_relative_eq!(stats.bias, 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            stats.rmsd * stats.rmsd,
            stats.bias * stats.bias + stats.crmsd * stats.crmsd,
            epsilon = 1e-12
        );
        assert_eq!(stats.kind, StatsKind::Unnormalized);
    }

    #[test]
    fn test_target_statistics_normalized() {
        // std(r) population = 2 for this reference
        let r = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let p: Vec<f64> = r.iter().map(|x| x + 1.0).collect();
        let raw = target_statistics(&p, &r, None, false).unwrap();
        let norm = target_statistics(&p, &r, None, true).unwrap();
        assert_relative_eq!(norm.bias, raw.bias / 2.0, epsilon = 1e-12);
        assert_relative_eq!(norm.rmsd, raw.rmsd / 2.0, epsilon = 1e-12);
        assert_relative_eq!(norm.crmsd, raw.crmsd / 2.0, epsilon = 1e-12);
        assert_eq!(norm.kind, StatsKind::Normalized);
    }

    #[test]
    fn test_target_statistics_from_field_sets() {
        let pred = FieldSet::new().with_field("data", vec![1.0, 2.0, 4.0]);
        let refs = FieldSet::new().with_field("data", vec![1.0, 2.0, 3.0]);
        let stats = target_statistics(&pred, &refs, Some("data"), false).unwrap();
        assert_relative_eq!(stats.bias, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_target_statistics_normalized_constant_reference() {
        let err = target_statistics(&[1.0, 2.0], &[3.0, 3.0], None, true).unwrap_err();
        assert_eq!(err, MetricsError::ZeroVariance { input: "reference" });
    }

    #[test]
    fn test_target_stats_serialize_type_tag() {
        let stats = target_statistics(&[1.0, 2.0], &[1.0, 3.0], None, false).unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"type\":\"unnormalized\""));
    }

    #[test]
    fn test_target_series_collects() {
        let a = target_statistics(&[1.0, 2.0], &[1.0, 3.0], None, false).unwrap();
        let b = target_statistics(&[2.0, 2.0], &[1.0, 3.0], None, false).unwrap();
        let series: TargetSeries = [a, b].iter().collect();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bias, vec![a.bias, b.bias]);
        assert_eq!(series.rmsd, vec![a.rmsd, b.rmsd]);
    }
}
