//! Descriptive statistics primitives shared by the skill metrics.
//!
//! All functions take plain slices and never allocate. Input validation
//! (equal lengths, finiteness, non-empty) is the caller's job; the metric
//! layer runs those checks once before calling in here.

/// Sum of a slice.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean of a slice. Returns NaN if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    sum(data) / data.len() as f64
}

/// Variance with `N - ddof` denominator.
///
/// `ddof = 0` gives the population variance, `ddof = 1` the sample variance.
/// Returns NaN when `N <= ddof`.
pub fn variance(data: &[f64], ddof: usize) -> f64 {
    let n = data.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n - ddof) as f64
}

/// Standard deviation with `N - ddof` denominator.
pub fn std_dev(data: &[f64], ddof: usize) -> f64 {
    variance(data, ddof).sqrt()
}

/// Population standard deviation (divide by N).
pub fn population_sd(data: &[f64]) -> f64 {
    std_dev(data, 0)
}

/// Sample standard deviation (divide by N - 1).
pub fn sample_sd(data: &[f64]) -> f64 {
    std_dev(data, 1)
}

/// Sum of squared deviations from the mean.
pub fn sum_sq_dev(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum()
}

/// Mean of the squared pairwise differences `(x - y)^2`.
///
/// Slices are zipped; the shorter length wins.
pub fn mean_sq_diff(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return f64::NAN;
    }
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        / n as f64
}

/// Pearson correlation coefficient.
///
/// Returns `None` if fewer than 2 pairs or if either series has zero
/// variance (the coefficient is undefined).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    // Rounding can push |r| a hair past 1 for perfectly linear data.
    Some((sum_xy / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_population_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_sd(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_variance_ddof() {
        // [3.0, 7.0]: mean=5, sum_sq=8
        assert_relative_eq!(variance(&[3.0, 7.0], 0), 4.0, epsilon = 1e-12);
        assert_relative_eq!(variance(&[3.0, 7.0], 1), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_too_short() {
        assert!(variance(&[5.0], 1).is_nan());
        assert!(variance(&[], 0).is_nan());
        assert_eq!(variance(&[5.0], 0), 0.0);
    }

    #[test]
    fn test_sum_sq_dev() {
        assert_relative_eq!(sum_sq_dev(&[1.0, 2.0, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_sq_diff() {
        assert_relative_eq!(
            mean_sq_diff(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]),
            1.0,
            epsilon = 1e-12
        );
        assert!(mean_sq_diff(&[], &[]).is_nan());
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_correlation_anti() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 2.0, 1.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_correlation_known_value() {
        // numpy.corrcoef([1, 2, 3, 4], [1, 3, 2, 4])[0, 1] = 0.8
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 4.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_correlation_constant() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_pearson_correlation_insufficient() {
        assert!(pearson_correlation(&[1.0], &[2.0]).is_none());
    }
}
