//! Placement of experiment markers shared by both diagrams.

use tracing::{debug, warn};

use crate::error::DiagramError;
use crate::figure::{Colorbar, Figure, HAlign, LegendEntry, Marker, TextItem, VAlign};
use crate::options::MarkerOptions;
use crate::style::{Color, MarkerSymbol};
use crate::ticks::{auto_ticks, axis_tick_label};

/// Font size of marker labels in pixels.
pub(crate) const LABEL_FONT_SIZE: f64 = 12.0;

const DEFAULT_SYMBOLS: [MarkerSymbol; 10] = [
    MarkerSymbol::Plus,
    MarkerSymbol::Circle,
    MarkerSymbol::Cross,
    MarkerSymbol::Square,
    MarkerSymbol::Diamond,
    MarkerSymbol::TriangleUp,
    MarkerSymbol::TriangleDown,
    MarkerSymbol::Pentagon,
    MarkerSymbol::Hexagon,
    MarkerSymbol::Star,
];

const DEFAULT_COLORS: [Color; 7] = [
    Color::RED,
    Color::BLUE,
    Color::GREEN,
    Color::CYAN,
    Color::MAGENTA,
    Color::YELLOW,
    Color::BLACK,
];

/// Number of distinct symbol and color combinations.
pub const MAX_DEFAULT_MARKERS: usize = DEFAULT_SYMBOLS.len() * DEFAULT_COLORS.len();

/// Symbol and color for each of `n` experiments.
///
/// Up to seven experiments get pairwise distinct symbols and colors.
/// Beyond that every symbol is combined with every color; past
/// [`MAX_DEFAULT_MARKERS`] combinations repeat and a warning is logged.
pub fn default_markers(n: usize) -> Vec<(MarkerSymbol, Color)> {
    if n <= DEFAULT_COLORS.len() {
        return DEFAULT_SYMBOLS
            .iter()
            .copied()
            .zip(DEFAULT_COLORS)
            .take(n)
            .collect();
    }
    if n > MAX_DEFAULT_MARKERS {
        warn!(
            n,
            max = MAX_DEFAULT_MARKERS,
            "more experiments than default markers, symbols will repeat"
        );
    }
    DEFAULT_SYMBOLS
        .iter()
        .flat_map(|&s| DEFAULT_COLORS.iter().map(move |&c| (s, c)))
        .cycle()
        .take(n)
        .collect()
}

/// Adds one marker per point `(x[i], y[i])` within `|x|, |y| <= limit`.
///
/// In legend mode every experiment gets its own symbol and color from
/// [`default_markers`] and its label goes into the figure legend. Otherwise
/// all markers share the configured symbol and color, and labels (when
/// given) are drawn next to the markers.
///
/// # Errors
///
/// Returns [`DiagramError::MissingLabels`] in legend mode without labels,
/// and [`DiagramError::LengthMismatch`] when the label count differs from
/// the number of points.
pub fn place_markers(
    figure: &mut Figure,
    x: &[f64],
    y: &[f64],
    limit: f64,
    options: &MarkerOptions,
) -> Result<(), DiagramError> {
    check_coordinates(x, y)?;
    if options.legend && options.labels.is_empty() {
        return Err(DiagramError::MissingLabels);
    }
    if !options.labels.is_empty() && options.labels.len() != x.len() {
        return Err(DiagramError::LengthMismatch {
            left: "markerlabel",
            left_len: options.labels.len(),
            right: "statistics",
            right_len: x.len(),
        });
    }

    let inside = |i: usize| x[i].abs() <= limit && y[i].abs() <= limit;

    if options.legend {
        let styles = default_markers(x.len());
        let mut shown = 0;
        for (i, &(symbol, color)) in styles.iter().enumerate() {
            if !inside(i) {
                debug!(index = i, x = x[i], y = y[i], limit, "marker outside axes");
                continue;
            }
            figure.push_marker(Marker {
                position: (x[i], y[i]),
                symbol,
                face: color,
                edge: color,
                alpha: options.alpha,
                size: options.size,
            });
            figure.push_legend(LegendEntry {
                label: options.labels[i].clone(),
                symbol,
                color,
            });
            shown += 1;
        }
        if shown == 0 {
            warn!(limit, "no markers within axis limit ranges");
        }
        return Ok(());
    }

    for i in (0..x.len()).filter(|&i| inside(i)) {
        figure.push_marker(Marker {
            position: (x[i], y[i]),
            symbol: options.symbol,
            face: options.color,
            edge: options.color,
            alpha: options.alpha,
            size: options.size,
        });
        if let Some(label) = options.labels.get(i) {
            figure.push_text(
                TextItem::new((x[i], y[i]), label.clone(), LABEL_FONT_SIZE)
                    .with_color(options.label_color)
                    .with_align(HAlign::Right, VAlign::Bottom),
            );
        }
    }
    Ok(())
}

/// Adds markers shaded by `z` through the color map, plus the color bar.
///
/// The color scale spans `cmap_range` when set, else the range of `z`.
/// With the color map switched off only the minimum and maximum of `z`
/// are labelled, and a single point produces no color bar.
pub fn place_colorbar_markers(
    figure: &mut Figure,
    x: &[f64],
    y: &[f64],
    z: &[f64],
    options: &MarkerOptions,
) -> Result<(), DiagramError> {
    check_coordinates(x, y)?;
    if z.len() != x.len() {
        return Err(DiagramError::LengthMismatch {
            left: "cmapzdata",
            left_len: z.len(),
            right: "statistics",
            right_len: x.len(),
        });
    }
    if let Some(&bad) = z.iter().find(|v| !v.is_finite()) {
        return Err(DiagramError::InvalidData {
            input: "cmapzdata",
            value: bad,
        });
    }
    if z.is_empty() {
        return Ok(());
    }

    let zmin = z.iter().copied().fold(f64::INFINITY, f64::min);
    let zmax = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (vmin, vmax) = options.cmap_range.unwrap_or((zmin, zmax));
    let span = vmax - vmin;

    for i in 0..x.len() {
        let t = if span > 0.0 { (z[i] - vmin) / span } else { 0.5 };
        let color = options.cmap.sample(t);
        figure.push_marker(Marker {
            position: (x[i], y[i]),
            symbol: options.cmap_marker,
            face: color,
            edge: color,
            alpha: options.alpha,
            size: options.size,
        });
    }

    let ticks = if options.colormap {
        auto_ticks(vmin, vmax)
            .into_iter()
            .filter(|&t| t >= vmin - span.abs() * 1e-9 && t <= vmax + span.abs() * 1e-9)
            .map(|t| (t, axis_tick_label(t)))
            .collect()
    } else if z.len() > 1 {
        vec![(zmin, "Min.".to_string()), (zmax, "Max.".to_string())]
    } else {
        return Ok(());
    };

    let title = if options.colorbar_title.is_empty() {
        "Color Scale".to_string()
    } else {
        options.colorbar_title.clone()
    };
    figure.set_colorbar(Colorbar {
        colormap: options.cmap,
        range: (vmin, vmax),
        location: options.colorbar_location,
        title,
        ticks,
    });
    Ok(())
}

fn check_coordinates(x: &[f64], y: &[f64]) -> Result<(), DiagramError> {
    if x.len() != y.len() {
        return Err(DiagramError::LengthMismatch {
            left: "x",
            left_len: x.len(),
            right: "y",
            right_len: y.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Colormap;

    #[test]
    fn test_default_markers_small_sets_are_distinct() {
        let m = default_markers(3);
        assert_eq!(
            m,
            vec![
                (MarkerSymbol::Plus, Color::RED),
                (MarkerSymbol::Circle, Color::BLUE),
                (MarkerSymbol::Cross, Color::GREEN),
            ]
        );
    }

    #[test]
    fn test_default_markers_product_order() {
        let m = default_markers(9);
        assert_eq!(m[0], (MarkerSymbol::Plus, Color::RED));
        assert_eq!(m[6], (MarkerSymbol::Plus, Color::BLACK));
        assert_eq!(m[7], (MarkerSymbol::Circle, Color::RED));
        assert_eq!(default_markers(75)[70], (MarkerSymbol::Plus, Color::RED));
    }

    #[test]
    fn test_place_markers_skips_outside_limit() {
        let mut fig = Figure::new();
        let options = MarkerOptions::default();
        place_markers(&mut fig, &[0.5, 3.0, -1.0], &[0.1, 0.0, -1.0], 1.0, &options).unwrap();
        let pos: Vec<_> = fig.markers().map(|m| m.position).collect();
        assert_eq!(pos, vec![(0.5, 0.1), (-1.0, -1.0)]);
        assert!(fig.legend().is_empty());
    }

    #[test]
    fn test_place_markers_labels_next_to_markers() {
        let mut fig = Figure::new();
        let options = MarkerOptions {
            labels: vec!["A".into(), "B".into()],
            ..MarkerOptions::default()
        };
        place_markers(&mut fig, &[0.5, 5.0], &[0.1, 0.0], 1.0, &options).unwrap();
        let texts: Vec<_> = fig.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A"]);
    }

    #[test]
    fn test_place_markers_legend_needs_labels() {
        let mut fig = Figure::new();
        let options = MarkerOptions {
            legend: true,
            ..MarkerOptions::default()
        };
        let err = place_markers(&mut fig, &[0.5], &[0.1], 1.0, &options).unwrap_err();
        assert!(matches!(err, DiagramError::MissingLabels));
    }

    #[test]
    fn test_place_markers_legend_entries() {
        let mut fig = Figure::new();
        let options = MarkerOptions {
            legend: true,
            labels: vec!["M1".into(), "M2".into(), "M3".into()],
            ..MarkerOptions::default()
        };
        place_markers(&mut fig, &[0.1, 0.2, 9.0], &[0.1, 0.2, 0.0], 1.0, &options).unwrap();
        let labels: Vec<_> = fig.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["M1", "M2"]);
        assert_eq!(fig.legend()[1].symbol, MarkerSymbol::Circle);
    }

    #[test]
    fn test_place_markers_label_count_mismatch() {
        let mut fig = Figure::new();
        let options = MarkerOptions {
            labels: vec!["A".into()],
            ..MarkerOptions::default()
        };
        assert!(place_markers(&mut fig, &[0.1, 0.2], &[0.1, 0.2], 1.0, &options).is_err());
    }

    #[test]
    fn test_colorbar_markers_span_colormap() {
        let mut fig = Figure::new();
        let options = MarkerOptions::default();
        place_colorbar_markers(&mut fig, &[0.0, 1.0], &[0.0, 1.0], &[2.0, 4.0], &options).unwrap();
        let faces: Vec<_> = fig.markers().map(|m| m.face).collect();
        assert_eq!(faces, vec![Colormap::Jet.sample(0.0), Colormap::Jet.sample(1.0)]);
        let bar = fig.colorbar().unwrap();
        assert_eq!(bar.range, (2.0, 4.0));
        assert_eq!(bar.title, "Color Scale");
        assert!(bar.ticks.iter().all(|&(t, _)| (2.0..=4.0).contains(&t)));
    }

    #[test]
    fn test_colorbar_min_max_labels() {
        let mut fig = Figure::new();
        let options = MarkerOptions {
            colormap: false,
            ..MarkerOptions::default()
        };
        place_colorbar_markers(&mut fig, &[0.0, 1.0], &[0.0, 1.0], &[2.0, 4.0], &options).unwrap();
        let labels: Vec<_> = fig.colorbar().unwrap().ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["Min.", "Max."]);
    }
}
