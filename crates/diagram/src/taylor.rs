//! Taylor diagram: standard deviation as radius, correlation as angle.
//!
//! The reference sits on the x axis at its own standard deviation; the
//! distance from it to an experiment is the centered RMS difference, drawn
//! as arcs about the reference point.

use std::f64::consts::{FRAC_PI_2, PI};

use skill_metrics::{TAYLOR_THRESHOLD, check_taylor_stats};
use tracing::debug;

use crate::error::DiagramError;
use crate::figure::{DiagramKind, Extent, Figure, HAlign, Marker, Polyline, TextItem, VAlign, arc, split_runs};
use crate::markers::{place_colorbar_markers, place_markers};
use crate::options::{DEFAULT_LINE_WIDTH, TaylorOptions};
use crate::style::{Color, LineStyle, MarkerDisplay};
use crate::target::{TICK_FONT_SIZE, TITLE_FONT_SIZE, check_same_len, check_series};
use crate::ticks::{auto_ticks, axis_tick_label, format_number};

/// Segments per half circle.
const HALF_CIRCLE_SEGMENTS: usize = 150;

/// Correlation rays of a single-panel diagram.
const DEFAULT_COR_TICKS: [f64; 13] = [1.0, 0.99, 0.95, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0];

/// Radial layout of a Taylor diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorAxes {
    /// Standard deviation of the reference.
    pub dx: f64,
    /// Outer radius.
    pub rmax: f64,
    /// Spacing of the automatic radial ticks.
    pub rinc: f64,
    /// 1 for correlations in `[0, 1]`, 2 for `[-1, 1]`.
    pub number_panels: u8,
    pub tick_std: Vec<f64>,
    pub rinc_std: f64,
    pub tick_rms: Vec<f64>,
    pub rinc_rms: f64,
    pub tick_cor: Vec<f64>,
}

/// Default correlation rays for one or two panels.
pub fn default_cor_ticks(number_panels: u8) -> Vec<f64> {
    let mut ticks = DEFAULT_COR_TICKS.to_vec();
    if number_panels == 2 {
        ticks.extend(DEFAULT_COR_TICKS.iter().rev().skip(1).map(|c| -c));
    }
    ticks
}

/// Computes the radial layout for standard deviations `sdev` (reference
/// first) and correlations `ccoef`.
///
/// With `axis_max` unset the outer radius is 1.1 times the largest
/// standard deviation and the number of radial ticks comes from the
/// automatic locator, halved or divided by three when there are more than
/// five.
pub fn taylor_diagram_axes(
    sdev: &[f64],
    ccoef: &[f64],
    options: &TaylorOptions,
) -> Result<TaylorAxes, DiagramError> {
    let dx = sdev.first().copied().ok_or(DiagramError::EmptyInput { input: "sdev" })?;
    let number_panels = options
        .number_panels()
        .unwrap_or(if ccoef.iter().any(|&c| c < 0.0) { 2 } else { 1 });

    let maxrho = if options.axis_max() == 0.0 {
        sdev.iter().fold(0.0, |m: f64, s| m.max(s.abs()))
    } else {
        options.axis_max()
    };
    if maxrho == 0.0 {
        return Err(DiagramError::DegenerateAxis {
            reason: "all standard deviations are zero".to_string(),
        });
    }

    let lim = 1.1 * maxrho;
    let rmax = if options.axis_max() == 0.0 { lim } else { options.axis_max() };
    let mut rticks = auto_ticks(-lim, lim).iter().filter(|&&t| t >= 0.0).count().saturating_sub(1);
    if rticks > 5 {
        if rticks % 2 == 0 {
            rticks /= 2;
        } else if rticks % 3 == 0 {
            rticks /= 3;
        }
    }
    if rticks == 0 {
        return Err(DiagramError::DegenerateAxis {
            reason: format!("no radial ticks below {rmax}"),
        });
    }
    let rinc = rmax / rticks as f64;
    let ticks: Vec<f64> = (1..=rticks).map(|k| k as f64 * rinc).collect();

    let (tick_rms, rinc_rms) = user_or_auto(&options.rms().ticks, &ticks, rinc);
    let (tick_std, rinc_std) = user_or_auto(&options.std().ticks, &ticks, rinc);
    let tick_cor = options
        .cor()
        .ticks
        .clone()
        .unwrap_or_else(|| default_cor_ticks(number_panels));

    debug!(rmax, rinc, number_panels, "taylor diagram axes");
    Ok(TaylorAxes {
        dx,
        rmax,
        rinc,
        number_panels,
        tick_std,
        rinc_std,
        tick_rms,
        rinc_rms,
        tick_cor,
    })
}

/// Lays out a Taylor diagram. Index 0 of every array is the reference;
/// experiments (index 1 onward) are placed at
/// `(sdev cos(acos R), sdev sin(acos R))`.
///
/// Marker labels, if any, name the experiments only. Color-bar display
/// shades markers by `cmap_zdata[1..]`, or by `crmsd[1..]` when no z data
/// are given. In overlay mode only markers are added.
///
/// # Errors
///
/// Returns [`DiagramError::Metrics`] when `check_stats` is on and the
/// statistics violate the Taylor relation.
#[tracing::instrument(skip_all, fields(n = sdev.len()))]
pub fn taylor_diagram(
    figure: &mut Figure,
    sdev: &[f64],
    crmsd: &[f64],
    ccoef: &[f64],
    options: &TaylorOptions,
) -> Result<(), DiagramError> {
    options.validate()?;
    check_series("sdev", sdev)?;
    check_series("crmsd", crmsd)?;
    check_series("ccoef", ccoef)?;
    check_same_len(("sdev", sdev), ("crmsd", crmsd))?;
    check_same_len(("sdev", sdev), ("ccoef", ccoef))?;
    if let Some(&c) = ccoef.iter().find(|c| !(-1.0..=1.0).contains(*c)) {
        return Err(DiagramError::InvalidData {
            input: "ccoef",
            value: c,
        });
    }
    if let Some(&s) = sdev.iter().find(|&&s| s < 0.0) {
        return Err(DiagramError::InvalidData {
            input: "sdev",
            value: s,
        });
    }
    if options.check_stats() {
        check_taylor_stats(sdev, crmsd, ccoef, TAYLOR_THRESHOLD)?;
    }

    let limit = if options.overlay() {
        match figure.axis_max() {
            Some(m) => m,
            None => taylor_diagram_axes(sdev, ccoef, options)?.rmax,
        }
    } else {
        let axes = taylor_diagram_axes(sdev, ccoef, options)?;
        figure.set_kind(DiagramKind::Taylor);
        figure.set_axis_max(axes.rmax);
        let x0 = if axes.number_panels == 2 { -axes.rmax } else { 0.0 };
        figure.set_extent(Extent {
            x: (x0, axes.rmax),
            y: (0.0, axes.rmax),
        });
        draw_rms_arcs(figure, &axes, options);
        draw_std_arcs(figure, &axes, options);
        draw_cor_rays(figure, &axes, options);
        draw_axes(figure, &axes, options);
        draw_obs(figure, &axes, options);
        axes.rmax
    };

    let (x, y): (Vec<f64>, Vec<f64>) = sdev[1..]
        .iter()
        .zip(&ccoef[1..])
        .map(|(&rho, &r)| {
            let theta = r.acos();
            (rho * theta.cos(), rho * theta.sin())
        })
        .unzip();

    let markers = options.markers();
    match markers.display {
        MarkerDisplay::Marker => place_markers(figure, &x, &y, limit, markers),
        MarkerDisplay::ColorBar => {
            let z = if markers.cmap_zdata.is_empty() {
                &crmsd[1..]
            } else {
                check_same_len(("cmapzdata", &markers.cmap_zdata), ("sdev", sdev))?;
                &markers.cmap_zdata[1..]
            };
            place_colorbar_markers(figure, &x, &y, z, markers)
        }
    }
}

fn user_or_auto(user: &[f64], auto: &[f64], rinc: f64) -> (Vec<f64>, f64) {
    if user.is_empty() {
        return (auto.to_vec(), rinc);
    }
    let mut ticks = user.to_vec();
    ticks.sort_by(f64::total_cmp);
    let span = ticks[ticks.len() - 1] - ticks[0];
    (ticks.clone(), span / ticks.len() as f64)
}

/// Arcs of constant centered RMS difference about the reference point,
/// clipped where they leave the outer standard deviation arc.
fn draw_rms_arcs(figure: &mut Figure, axes: &TaylorAxes, options: &TaylorOptions) {
    let rms = options.rms();
    let (dx, rmax) = (axes.dx, axes.rmax);
    let label_angle = rms.label_angle.unwrap_or_else(|| {
        let last_std = axes.tick_std.last().copied().unwrap_or(rmax);
        180.0 - last_std.atan2(dx).to_degrees()
    });
    let (cst, snt) = (label_angle.to_radians().cos(), label_angle.to_radians().sin());

    let step = PI / HALF_CIRCLE_SEGMENTS as f64;
    for &r in &axes.tick_rms {
        // first angle on the outer arc at least r away from the reference
        let Some(phi) = (0..2 * HALF_CIRCLE_SEGMENTS)
            .map(|k| k as f64 * step)
            .find(|th| (dx * dx + rmax * rmax - 2.0 * dx * rmax * th.cos()).sqrt() >= r)
        else {
            continue;
        };
        let cut = rmax * phi.cos();
        let points = arc(dx, r, 0.0, PI, HALF_CIRCLE_SEGMENTS);
        let runs = split_runs(&points, |(x, _)| x <= cut && (axes.number_panels == 2 || x >= 0.0));
        for run in runs {
            figure.push_line(Polyline {
                points: run,
                color: rms.color,
                style: rms.style,
                width: rms.width,
            });
        }

        if rms.show_labels {
            let rt = r + axes.rinc_rms / 20.0;
            let rt = if label_angle > 90.0 {
                rt + cst.abs() * axes.rinc / 5.0
            } else {
                rt
            };
            let text = match rms.label_precision {
                Some(p) => format!("{r:.p$}"),
                None => format_number(r, 6),
            };
            figure.push_text(TextItem::new((rt * cst + dx, rt * snt), text, TITLE_FONT_SIZE).with_color(rms.color));
        }
    }

    if rms.show_title && !axes.tick_rms.is_empty() {
        let (w0, w1) = if axes.number_panels == 1 { (0.8, 0.2) } else { (0.7, 0.3) };
        let t = &axes.tick_rms;
        let dd = match (t.first(), t.get(1), t.get(2)) {
            (Some(&a), Some(&b), _) if a > 0.0 => w0 * a + w1 * b,
            (_, Some(&b), Some(&c)) => w0 * b + w1 * c,
            (Some(&a), ..) => a,
            _ => return,
        };
        let spread = if dd / rmax < 0.35 { 20.0 } else { 10.0 };
        let v_align = if axes.number_panels == 1 { VAlign::Top } else { VAlign::Bottom };
        for (ch, angle) in rms.label.chars().zip(reversed_linspace(rms.title_angle, spread, rms.label.chars().count())) {
            let a = angle.to_radians();
            figure.push_text(
                TextItem::new((dx + dd * a.cos(), dd * a.sin()), ch.to_string(), TITLE_FONT_SIZE)
                    .with_color(rms.color)
                    .with_align(HAlign::Center, v_align)
                    .bold(),
            );
        }
    }
}

/// Arcs of constant standard deviation about the origin. The outermost
/// tick is drawn solid.
fn draw_std_arcs(figure: &mut Figure, axes: &TaylorAxes, options: &TaylorOptions) {
    let std = options.std();
    let (end, segments) = if axes.number_panels == 1 {
        (FRAC_PI_2, HALF_CIRCLE_SEGMENTS / 2)
    } else {
        (PI, HALF_CIRCLE_SEGMENTS)
    };
    let last = axes.tick_std.len().saturating_sub(1);
    for (i, &r) in axes.tick_std.iter().enumerate() {
        let style = if i == last { LineStyle::Solid } else { std.style };
        figure.push_line(Polyline {
            points: arc(0.0, r, 0.0, end, segments),
            color: std.color,
            style,
            width: std.width,
        });
    }
    let outer = axes.tick_std.last().copied().unwrap_or(0.0);
    if (outer - axes.rmax).abs() > 1e-12 * axes.rmax {
        figure.push_line(Polyline {
            points: arc(0.0, axes.rmax, 0.0, end, segments),
            color: std.color,
            style: std.style,
            width: std.width,
        });
    }
}

fn draw_cor_rays(figure: &mut Figure, axes: &TaylorAxes, options: &TaylorOptions) {
    let cor = options.cor();
    let rmax = axes.rmax;
    for &c in &axes.tick_cor {
        let th = c.acos();
        let (cs, sn) = (th.cos(), th.sin());
        figure.push_line(Polyline {
            points: vec![(0.0, 0.0), (rmax * cs, rmax * sn)],
            color: cor.color,
            style: cor.style,
            width: cor.width,
        });
        if cor.show_labels {
            let rt = 1.05 * rmax;
            let x = if axes.number_panels == 2 {
                (1.05 + cs.abs() / 30.0) * rmax * cs
            } else {
                rt * cs
            };
            figure.push_text(
                TextItem::new((x, rt * sn), format_number(c, 2), TITLE_FONT_SIZE)
                    .with_color(cor.color)
                    .with_align(HAlign::Center, VAlign::Bottom),
            );
        }
    }

    if cor.show_title {
        let label = "Correlation Coefficient";
        let (center, spread) = if axes.number_panels == 1 { (45.0, 15.0) } else { (90.0, 25.0) };
        let dd = 1.1 * rmax;
        for (ch, angle) in label.chars().zip(reversed_linspace(center, spread, label.len())) {
            let a = angle.to_radians();
            figure.push_text(
                TextItem::new((dd * a.cos(), dd * a.sin()), ch.to_string(), TITLE_FONT_SIZE)
                    .with_color(cor.color)
                    .with_align(HAlign::Center, VAlign::Bottom)
                    .bold(),
            );
        }
    }
}

fn draw_axes(figure: &mut Figure, axes: &TaylorAxes, options: &TaylorOptions) {
    let std = options.std();
    let rmax = axes.rmax;
    let axis = |points, width| Polyline {
        points,
        color: Color::BLACK,
        style: LineStyle::Solid,
        width,
    };
    let gap = rmax / 40.0;

    let mut xticks = vec![0.0];
    xticks.extend(&axes.tick_std);
    if axes.number_panels == 1 {
        figure.push_line(axis(vec![(0.0, 0.0), (rmax, 0.0)], DEFAULT_LINE_WIDTH + 2.0));
        figure.push_line(axis(vec![(0.0, 0.0), (0.0, rmax)], DEFAULT_LINE_WIDTH + 1.0));
        if std.show_labels {
            for &t in xticks.iter().filter(|&&t| t <= rmax * (1.0 + 1e-12)) {
                let label = axis_tick_label(t);
                figure.push_text(
                    TextItem::new((t, -gap), label.clone(), TICK_FONT_SIZE)
                        .with_color(std.color)
                        .with_align(HAlign::Center, VAlign::Top),
                );
                figure.push_text(
                    TextItem::new((-gap, t), label, TICK_FONT_SIZE)
                        .with_color(std.color)
                        .with_align(HAlign::Right, VAlign::Center),
                );
            }
        }
        if std.show_title {
            figure.push_text(
                TextItem::new((-6.0 * gap, rmax / 2.0), "Standard Deviation", TITLE_FONT_SIZE)
                    .with_color(std.color)
                    .vertical()
                    .bold(),
            );
        }
    } else {
        figure.push_line(axis(vec![(-rmax, 0.0), (rmax, 0.0)], DEFAULT_LINE_WIDTH + 1.0));
        figure.push_line(axis(vec![(0.0, 0.0), (0.0, rmax)], DEFAULT_LINE_WIDTH));
        if std.show_labels {
            let mirrored = axes.tick_std.iter().rev().map(|t| -t);
            for t in mirrored.chain(xticks.iter().copied()) {
                figure.push_text(
                    TextItem::new((t, -gap), axis_tick_label(t), TICK_FONT_SIZE)
                        .with_color(std.color)
                        .with_align(HAlign::Center, VAlign::Top),
                );
            }
        }
        if std.show_title {
            figure.push_text(
                TextItem::new((0.0, -6.0 * gap), "Standard Deviation", TITLE_FONT_SIZE)
                    .with_color(std.color)
                    .with_align(HAlign::Center, VAlign::Top)
                    .bold(),
            );
        }
    }
}

/// Reference marker, label and arc.
fn draw_obs(figure: &mut Figure, axes: &TaylorAxes, options: &TaylorOptions) {
    let obs = options.obs();
    let dx = axes.dx;
    if let Some(symbol) = obs.marker {
        figure.push_marker(Marker {
            position: (dx, 0.001 * axes.rmax),
            symbol,
            face: obs.color,
            edge: obs.color,
            alpha: 1.0,
            size: (options.markers().size - 4.0).max(1.0),
        });
    }
    figure.push_text(
        TextItem::new((dx, -3.0 * axes.rmax / 40.0), obs.title.clone(), TITLE_FONT_SIZE)
            .with_color(obs.color)
            .with_align(HAlign::Center, VAlign::Top)
            .bold(),
    );
    let end = if axes.number_panels == 1 { FRAC_PI_2 } else { PI };
    figure.push_line(Polyline {
        points: arc(0.0, dx, 0.0, end, HALF_CIRCLE_SEGMENTS),
        color: obs.color,
        style: obs.style,
        width: obs.width,
    });
}

/// `n` angles from `center + spread` down to `center - spread` (degrees).
fn reversed_linspace(center: f64, spread: f64, n: usize) -> impl Iterator<Item = f64> {
    let (lo, hi) = (center - spread, center + spread);
    (0..n).map(move |i| {
        if n <= 1 {
            center
        } else {
            hi - (hi - lo) * i as f64 / (n - 1) as f64
        }
    })
}
