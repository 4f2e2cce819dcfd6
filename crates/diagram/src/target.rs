//! Target diagram: bias against centered RMS difference.
//!
//! Each experiment sits at `(crmsd, bias)`, so its distance from the
//! origin is the total RMS difference. Reference circles mark fixed RMSD
//! levels.

use std::f64::consts::TAU;

use tracing::debug;

use crate::error::DiagramError;
use crate::figure::{DiagramKind, Extent, Figure, HAlign, Polyline, TextItem, VAlign, arc};
use crate::markers::{place_colorbar_markers, place_markers};
use crate::options::{DEFAULT_LINE_WIDTH, TargetOptions};
use crate::style::{Color, LineStyle, MarkerDisplay};
use crate::ticks::{auto_ticks, axis_tick_label, symmetric_ticks, use_sci_notation};

/// Font size of axis titles in pixels.
pub(crate) const TITLE_FONT_SIZE: f64 = 14.0;
/// Font size of tick labels in pixels.
pub(crate) const TICK_FONT_SIZE: f64 = 12.0;

/// Ticks closer to zero than this are the origin.
const ZERO_TOLERANCE: f64 = 1e-14;

/// Number of segments used to draw a full circle.
const CIRCLE_SEGMENTS: usize = 628;

/// Tick values and labels of a target diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAxes {
    pub xticks: Vec<f64>,
    pub yticks: Vec<f64>,
    /// One label per x tick; empty strings are unlabelled.
    pub xlabels: Vec<String>,
    pub ylabels: Vec<String>,
    /// Limit on `|x|` and `|y|` for markers and the circle radii.
    pub axis_max: f64,
}

/// Computes ticks and labels for points `(x[i], y[i])`.
///
/// With `axis_max` unset both ranges come from the data and are rounded out
/// to the last automatic tick. Every other x label is blanked when it needs
/// scientific notation, and the label at the origin is always blank.
///
/// # Errors
///
/// Returns [`DiagramError::DegenerateAxis`] when the data give no positive
/// tick, e.g. when every value is zero.
pub fn target_diagram_axes(
    x: &[f64],
    y: &[f64],
    options: &TargetOptions,
) -> Result<TargetAxes, DiagramError> {
    let auto = options.axis_max() == 0.0;
    let (mut maxx, mut maxy) = if auto {
        (max_abs(x), max_abs(y))
    } else {
        (options.axis_max(), options.axis_max())
    };
    if maxx == 0.0 && maxy == 0.0 {
        return Err(DiagramError::DegenerateAxis {
            reason: "all statistics are zero".to_string(),
        });
    }

    let xauto = auto_ticks(-maxx, maxx);
    let yauto = auto_ticks(-maxy, maxy);
    let mut nx = xauto.iter().filter(|&&t| t > 0.0).count();
    let mut ny = yauto.iter().filter(|&&t| t > 0.0).count();
    if nx == 0 || ny == 0 {
        return Err(DiagramError::DegenerateAxis {
            reason: format!("no positive ticks for axis maximum ({maxx}, {maxy})"),
        });
    }

    let mut axis_max = options.axis_max();
    if auto {
        maxx = xauto.last().copied().unwrap_or(maxx);
        maxy = yauto.last().copied().unwrap_or(maxy);
        axis_max = maxx.max(maxy);
    }

    if options.equal_axes() {
        if maxx > maxy {
            maxy = maxx;
            ny = nx;
        } else {
            maxx = maxy;
            nx = ny;
        }
    }

    let (xticks, yticks) = if options.ticks().is_empty() {
        (
            symmetric_ticks(maxx / nx as f64, nx),
            symmetric_ticks(maxy / ny as f64, ny),
        )
    } else {
        (options.ticks().to_vec(), options.ticks().to_vec())
    };

    let mut xlabels: Vec<String> = xticks
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            if !is_labelled(t, options.xtick_label_pos()) || (i % 2 == 1 && use_sci_notation(t)) {
                String::new()
            } else {
                axis_tick_label(t)
            }
        })
        .collect();
    let mut ylabels: Vec<String> = yticks
        .iter()
        .map(|&t| {
            if is_labelled(t, options.ytick_label_pos()) {
                axis_tick_label(t)
            } else {
                String::new()
            }
        })
        .collect();
    blank_origin(&xticks, &mut xlabels);
    blank_origin(&yticks, &mut ylabels);

    debug!(axis_max, nx, ny, "target diagram axes");
    Ok(TargetAxes {
        xticks,
        yticks,
        xlabels,
        ylabels,
        axis_max,
    })
}

/// Lays out a target diagram for parallel arrays of statistics.
///
/// Markers are placed at `(crmsd[i], bias[i])`. Color-bar display shades
/// them by `cmap_zdata`, or by `rmsd` when no z data are given. In overlay
/// mode only markers are added and the axis maximum of the existing
/// figure limits them.
#[tracing::instrument(skip_all, fields(n = bias.len()))]
pub fn target_diagram(
    figure: &mut Figure,
    bias: &[f64],
    crmsd: &[f64],
    rmsd: &[f64],
    options: &TargetOptions,
) -> Result<(), DiagramError> {
    options.validate()?;
    check_series("bias", bias)?;
    check_series("crmsd", crmsd)?;
    check_series("rmsd", rmsd)?;
    check_same_len(("bias", bias), ("crmsd", crmsd))?;
    check_same_len(("bias", bias), ("rmsd", rmsd))?;

    let limit = if options.overlay() {
        match figure.axis_max() {
            Some(m) => m,
            None if options.axis_max() > 0.0 => options.axis_max(),
            None => target_diagram_axes(crmsd, bias, options)?.axis_max,
        }
    } else {
        let axes = target_diagram_axes(crmsd, bias, options)?;
        figure.set_kind(DiagramKind::Target);
        figure.set_axis_max(axes.axis_max);
        figure.set_extent(Extent {
            x: span(&axes.xticks),
            y: span(&axes.yticks),
        });
        draw_axes(figure, &axes);
        draw_circles(figure, axes.axis_max, options);
        axes.axis_max
    };

    let markers = options.markers();
    match markers.display {
        MarkerDisplay::Marker => place_markers(figure, crmsd, bias, limit, markers),
        MarkerDisplay::ColorBar => {
            let z = if markers.cmap_zdata.is_empty() {
                rmsd
            } else {
                &markers.cmap_zdata
            };
            place_colorbar_markers(figure, crmsd, bias, z, markers)
        }
    }
}

fn draw_axes(figure: &mut Figure, axes: &TargetAxes) {
    let (x0, x1) = span(&axes.xticks);
    let (y0, y1) = span(&axes.yticks);
    let axis = |points| Polyline {
        points,
        color: Color::BLACK,
        style: LineStyle::Solid,
        width: DEFAULT_LINE_WIDTH,
    };
    figure.push_line(axis(vec![(x0, 0.0), (x1, 0.0)]));
    figure.push_line(axis(vec![(0.0, y0), (0.0, y1)]));

    // inward ticks: up from the x axis, right of the y axis
    let tick_len = (x1 - x0).max(y1 - y0) / 100.0;
    let gap = 1.5 * tick_len;
    for (&t, label) in axes.xticks.iter().zip(&axes.xlabels) {
        figure.push_line(Polyline {
            width: 1.0,
            ..axis(vec![(t, 0.0), (t, tick_len)])
        });
        figure.push_text(
            TextItem::new((t, -gap), label.clone(), TICK_FONT_SIZE).with_align(HAlign::Center, VAlign::Top),
        );
    }
    for (&t, label) in axes.yticks.iter().zip(&axes.ylabels) {
        figure.push_line(Polyline {
            width: 1.0,
            ..axis(vec![(0.0, t), (tick_len, t)])
        });
        figure.push_text(
            TextItem::new((-gap, t), label.clone(), TICK_FONT_SIZE).with_align(HAlign::Right, VAlign::Center),
        );
    }

    figure.push_text(
        TextItem::new((x1 + 2.0 * x1 / 30.0, x1 / 30.0), "uRMSD", TITLE_FONT_SIZE)
            .with_align(HAlign::Left, VAlign::Center),
    );
    figure.push_text(
        TextItem::new((0.0, y1 + 2.0 * y1 / 30.0), "Bias", TITLE_FONT_SIZE)
            .with_align(HAlign::Center, VAlign::Bottom),
    );
}

fn draw_circles(figure: &mut Figure, axis_max: f64, options: &TargetOptions) {
    let spec = options.circle_spec();
    let width = options.circle_line_width();
    let circle = |radius: f64, color: Color, style: LineStyle| Polyline {
        points: arc(0.0, radius, 0.0, TAU, CIRCLE_SEGMENTS),
        color,
        style,
        width,
    };

    let radii: Vec<f64> = if options.normalized() {
        figure.push_line(circle(1.0, Color::BLACK, LineStyle::Solid));
        vec![0.5, 1.0]
    } else if options.circles().is_empty() {
        vec![0.7 * axis_max, axis_max]
    } else {
        options.circles().iter().copied().filter(|&c| c <= axis_max).collect()
    };
    for r in radii {
        figure.push_line(circle(r, spec.color, spec.style));
    }

    if options.obs_uncertainty() > 0.0 {
        figure.push_line(circle(options.obs_uncertainty(), Color::BLUE, LineStyle::Dashed));
    }
}

fn is_labelled(tick: f64, positions: &[f64]) -> bool {
    positions.is_empty()
        || positions
            .iter()
            .any(|&p| (p - tick).abs() <= 1e-12 * tick.abs().max(1.0))
}

fn blank_origin(ticks: &[f64], labels: &mut [String]) {
    if let Some(i) = ticks.iter().position(|t| t.abs() < ZERO_TOLERANCE) {
        labels[i].clear();
    }
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}

fn span(ticks: &[f64]) -> (f64, f64) {
    match (ticks.first(), ticks.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => (-1.0, 1.0),
    }
}

pub(crate) fn check_series(name: &'static str, values: &[f64]) -> Result<(), DiagramError> {
    if values.is_empty() {
        return Err(DiagramError::EmptyInput { input: name });
    }
    if let Some(&v) = values.iter().find(|v| !v.is_finite()) {
        return Err(DiagramError::InvalidData { input: name, value: v });
    }
    Ok(())
}

pub(crate) fn check_same_len(
    (left, a): (&'static str, &[f64]),
    (right, b): (&'static str, &[f64]),
) -> Result<(), DiagramError> {
    if a.len() != b.len() {
        return Err(DiagramError::LengthMismatch {
            left,
            left_len: a.len(),
            right,
            right_len: b.len(),
        });
    }
    Ok(())
}
