//! Automatic tick placement and tick labels.
//!
//! [`max_n_locator`] picks "nice" tick values (multiples of 1, 2, 2.5 or 5
//! times a power of ten) so that at most `nbins` intervals cover a range.
//! The diagrams use nine bins, which gives the familiar 5 to 11 ticks on a
//! symmetric axis.

/// Default number of intervals for automatic ticks.
pub const DEFAULT_NBINS: usize = 9;

/// Minimum number of ticks that must fall inside the range.
const MIN_N_TICKS: usize = 2;

/// Nice step multipliers, extended one decade down and one step up.
const EXTENDED_STEPS: [f64; 10] = [0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 2.5, 5.0, 10.0, 20.0];

/// Relative tolerance for snapping range edges onto step multiples.
const EDGE_TOLERANCE: f64 = 1e-10;

/// Nice tick values covering `[vmin, vmax]` with at most `nbins` intervals.
///
/// The first and last tick may lie slightly outside the range. A collapsed
/// range is widened by a tiny amount first so a result is always produced.
pub fn max_n_locator(vmin: f64, vmax: f64, nbins: usize) -> Vec<f64> {
    let (vmin, vmax) = nonsingular(vmin, vmax);
    let nbins = nbins.max(1) as f64;

    let scale = 10f64.powf(((vmax - vmin) / nbins).log10().floor());
    let raw_step = (vmax - vmin) / nbins;
    let steps: Vec<f64> = EXTENDED_STEPS.iter().map(|s| s * scale).collect();
    let istep = steps
        .iter()
        .position(|&s| s >= raw_step)
        .unwrap_or(steps.len() - 1);

    let mut ticks = Vec::new();
    for &step in steps[..=istep].iter().rev() {
        let best_vmin = floor_div(vmin, step) * step;
        let low = edge_le(vmin - best_vmin, step);
        let high = edge_ge(vmax - best_vmin, step);
        ticks = ((low as i64)..=(high as i64))
            .map(|k| snap_zero(k as f64 * step + best_vmin, step))
            .collect();
        let inside = ticks.iter().filter(|&&t| t >= vmin && t <= vmax).count();
        if inside >= MIN_N_TICKS {
            break;
        }
    }
    ticks
}

/// [`max_n_locator`] with [`DEFAULT_NBINS`].
pub fn auto_ticks(vmin: f64, vmax: f64) -> Vec<f64> {
    max_n_locator(vmin, vmax, DEFAULT_NBINS)
}

fn nonsingular(vmin: f64, vmax: f64) -> (f64, f64) {
    let (lo, hi) = if vmin <= vmax { (vmin, vmax) } else { (vmax, vmin) };
    let span = hi - lo;
    let magnitude = lo.abs().max(hi.abs());
    if span <= magnitude * 1e-12 || span < 1e-14 {
        if magnitude < 1e-14 {
            return (-1e-13, 1e-13);
        }
        return (lo - magnitude * 1e-13, hi + magnitude * 1e-13);
    }
    (lo, hi)
}

/// Python-style floor division for a positive divisor.
fn floor_div(x: f64, step: f64) -> f64 {
    let m = x.rem_euclid(step);
    ((x - m) / step).round()
}

fn edge_le(x: f64, step: f64) -> f64 {
    let d = floor_div(x, step);
    let m = x.rem_euclid(step);
    if ((m / step) - 1.0).abs() < EDGE_TOLERANCE { d + 1.0 } else { d }
}

fn edge_ge(x: f64, step: f64) -> f64 {
    let d = floor_div(x, step);
    let m = x.rem_euclid(step);
    if (m / step).abs() < EDGE_TOLERANCE { d } else { d + 1.0 }
}

fn snap_zero(t: f64, step: f64) -> f64 {
    if t.abs() < step * 1e-9 { 0.0 } else { t }
}

/// Whether a tick value is small enough to need scientific notation.
pub fn use_sci_notation(value: f64) -> bool {
    let a = value.abs();
    a > 0.0 && a < 1e-3
}

/// Tick label without floating-point noise.
///
/// `59.400000000000006` becomes `"59.4"` and `2.0` becomes `"2"`. Values
/// below 1e-3 in magnitude use one-decimal scientific notation with a
/// signed two-digit exponent, e.g. `"5.0e-04"`.
pub fn axis_tick_label(value: f64) -> String {
    if use_sci_notation(value) {
        return format_sci(value, 1);
    }
    format_number(value, 6)
}

/// Fixed-point with at most `decimals` digits and no trailing zeros.
pub fn format_number(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Scientific notation such as `5.0e-04` or `1.2e+03`.
pub fn format_sci(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

/// `n` evenly spaced multiples of `step` on each side of zero:
/// `[-n*step, ..., 0, ..., n*step]`.
pub fn symmetric_ticks(step: f64, n: usize) -> Vec<f64> {
    let n = n as i64;
    (-n..=n).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_ticks(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_locator_half_steps() {
        assert_ticks(
            &auto_ticks(-1.3, 1.3),
            &[-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5],
        );
    }

    #[test]
    fn test_locator_quarter_steps() {
        assert_ticks(
            &auto_ticks(-1.0, 1.0),
            &[-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0],
        );
    }

    #[test]
    fn test_locator_extends_past_range() {
        assert_ticks(
            &auto_ticks(-7.5, 7.5),
            &[-8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0],
        );
        let t = auto_ticks(-45.0, 45.0);
        assert_eq!(t.len(), 11);
        assert_relative_eq!(t[10], 50.0);
    }

    #[test]
    fn test_locator_small_range() {
        let t = auto_ticks(-0.3, 0.3);
        assert_eq!(t.len(), 7);
        assert_relative_eq!(t[6], 0.3, epsilon = 1e-12);
        assert_eq!(t[3], 0.0);
    }

    #[test]
    fn test_locator_collapsed_range() {
        let t = auto_ticks(0.0, 0.0);
        assert!(t.len() >= 2);
    }

    #[test]
    fn test_sci_notation_threshold() {
        assert!(use_sci_notation(5e-4));
        assert!(use_sci_notation(-5e-4));
        assert!(!use_sci_notation(0.0));
        assert!(!use_sci_notation(1e-3));
        assert!(!use_sci_notation(250.0));
    }

    #[test]
    fn test_axis_tick_label() {
        assert_eq!(axis_tick_label(59.400000000000006), "59.4");
        assert_eq!(axis_tick_label(0.30000000000000004), "0.3");
        assert_eq!(axis_tick_label(-1.5), "-1.5");
        assert_eq!(axis_tick_label(2.0), "2");
        assert_eq!(axis_tick_label(0.0), "0");
        assert_eq!(axis_tick_label(0.0005), "5.0e-04");
        assert_eq!(axis_tick_label(-0.00025), "-2.5e-04");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_number(0.95, 2), "0.95");
        assert_eq!(format_number(-0.0000001, 2), "0");
        assert_eq!(format_sci(1234.0, 1), "1.2e+03");
    }

    #[test]
    fn test_symmetric_ticks() {
        assert_eq!(symmetric_ticks(0.5, 2), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
