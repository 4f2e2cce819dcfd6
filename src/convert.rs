//! Pure conversion functions: TOML config structs -> diagram option types.

use std::str::FromStr;

use anyhow::{Context, Result, bail};

use skill_diagram::{
    Color, CorAxis, DiagramError, MarkerOptions, ObsOptions, OnOff, RmsAxis, StdAxis, TargetOptions, TaylorOptions,
};

use crate::config::*;

/// Parses a color given by name, code, hex string or RGB triple.
pub fn parse_color(c: &ColorToml) -> Result<Color> {
    match c {
        ColorToml::Name(name) => Ok(name.parse()?),
        ColorToml::Rgb([r, g, b]) => Ok(Color::rgb(*r, *g, *b)?),
    }
}

/// Parses an on/off switch.
pub fn parse_switch(s: &SwitchToml) -> Result<bool> {
    match s {
        SwitchToml::Bool(b) => Ok(*b),
        SwitchToml::Text(t) => Ok(t.parse::<OnOff>()?.is_on()),
    }
}

/// Parses a textual option value, naming the option on failure.
fn parse_named<T>(value: &str, option: &str) -> Result<T>
where
    T: FromStr<Err = DiagramError>,
{
    value.parse().with_context(|| format!("invalid value for {option}"))
}

fn color_or(c: Option<&ColorToml>, default: Color, option: &str) -> Result<Color> {
    match c {
        Some(c) => parse_color(c).with_context(|| format!("invalid value for {option}")),
        None => Ok(default),
    }
}

fn switch_or(s: Option<&SwitchToml>, default: bool, option: &str) -> Result<bool> {
    match s {
        Some(s) => parse_switch(s).with_context(|| format!("invalid value for {option}")),
        None => Ok(default),
    }
}

/// Builds [`MarkerOptions`] from a `markers` table.
///
/// `section` prefixes option names in error messages, e.g. `"target.markers"`.
pub fn build_marker_options(m: &MarkersToml, section: &str) -> Result<MarkerOptions> {
    let d = MarkerOptions::default();
    let key = |name: &str| format!("{section}.{name}");

    let cmap_range = match m.cmap_range {
        Some([lo, hi]) if lo >= hi => bail!("{}: vmin must be below vmax, got [{lo}, {hi}]", key("cmap_range")),
        Some([lo, hi]) => Some((lo, hi)),
        None => None,
    };

    let options = MarkerOptions {
        alpha: m.alpha.unwrap_or(d.alpha),
        display: match m.display {
            Some(ref s) => parse_named(s, &key("display"))?,
            None => d.display,
        },
        labels: m.labels.clone(),
        label_color: color_or(m.label_color.as_ref(), d.label_color, &key("label_color"))?,
        color: color_or(m.color.as_ref(), d.color, &key("color"))?,
        legend: switch_or(m.legend.as_ref(), d.legend, &key("legend"))?,
        size: m.size.unwrap_or(d.size),
        symbol: match m.symbol {
            Some(ref s) => parse_named(s, &key("symbol"))?,
            None => d.symbol,
        },
        colormap: switch_or(m.colormap.as_ref(), d.colormap, &key("colormap"))?,
        cmap: match m.cmap {
            Some(ref s) => parse_named(s, &key("cmap"))?,
            None => d.cmap,
        },
        cmap_range,
        cmap_marker: match m.cmap_marker {
            Some(ref s) => parse_named(s, &key("cmap_marker"))?,
            None => d.cmap_marker,
        },
        cmap_zdata: m.cmap_zdata.clone(),
        colorbar_location: match m.colorbar_location {
            Some(ref s) => parse_named(s, &key("colorbar_location"))?,
            None => d.colorbar_location,
        },
        colorbar_title: m.colorbar_title.clone().unwrap_or(d.colorbar_title),
    };
    options.validate().with_context(|| format!("invalid [{section}] options"))?;
    Ok(options)
}

/// Builds [`TargetOptions`] from the `[target]` table.
pub fn build_target_options(t: &TargetToml) -> Result<TargetOptions> {
    let d = TargetOptions::default();
    let mut cfg = d
        .clone()
        .with_circles(t.circles.clone())
        .with_equal_axes(switch_or(t.equal_axes.as_ref(), d.equal_axes(), "target.equal_axes")?)
        .with_normalized(switch_or(t.normalized.as_ref(), d.normalized(), "target.normalized")?)
        .with_ticks(t.ticks.clone())
        .with_xtick_label_pos(t.xtick_label_pos.clone())
        .with_ytick_label_pos(t.ytick_label_pos.clone())
        .with_markers(build_marker_options(&t.markers, "target.markers")?);
    if let Some(v) = t.axis_max {
        cfg = cfg.with_axis_max(v);
    }
    if let Some(ref spec) = t.circle_line_spec {
        cfg = cfg.with_circle_spec(parse_named(spec, "target.circle_line_spec")?);
    }
    if let Some(w) = t.circle_line_width {
        cfg = cfg.with_circle_line_width(w);
    }
    if let Some(r) = t.obs_uncertainty {
        cfg = cfg.with_obs_uncertainty(r);
    }
    cfg.validate().context("invalid [target] options")?;
    Ok(cfg)
}

fn build_rms_axis(r: &RmsToml) -> Result<RmsAxis> {
    let d = RmsAxis::default();
    Ok(RmsAxis {
        ticks: r.ticks.clone(),
        color: color_or(r.color.as_ref(), d.color, "taylor.rms.color")?,
        show_labels: switch_or(r.show_labels.as_ref(), d.show_labels, "taylor.rms.show_labels")?,
        label_angle: r.label_angle.or(d.label_angle),
        label_precision: r.label_precision.or(d.label_precision),
        style: match r.style {
            Some(ref s) => parse_named(s, "taylor.rms.style")?,
            None => d.style,
        },
        width: r.width.unwrap_or(d.width),
        label: r.label.clone().unwrap_or(d.label),
        show_title: switch_or(r.show_title.as_ref(), d.show_title, "taylor.rms.show_title")?,
        title_angle: r.title_angle.unwrap_or(d.title_angle),
    })
}

fn build_std_axis(s: &StdToml) -> Result<StdAxis> {
    let d = StdAxis::default();
    Ok(StdAxis {
        ticks: s.ticks.clone(),
        color: color_or(s.color.as_ref(), d.color, "taylor.std.color")?,
        show_labels: switch_or(s.show_labels.as_ref(), d.show_labels, "taylor.std.show_labels")?,
        style: match s.style {
            Some(ref v) => parse_named(v, "taylor.std.style")?,
            None => d.style,
        },
        width: s.width.unwrap_or(d.width),
        show_title: switch_or(s.show_title.as_ref(), d.show_title, "taylor.std.show_title")?,
    })
}

fn build_cor_axis(c: &CorToml) -> Result<CorAxis> {
    let d = CorAxis::default();
    Ok(CorAxis {
        ticks: c.ticks.clone(),
        color: color_or(c.color.as_ref(), d.color, "taylor.cor.color")?,
        show_labels: switch_or(c.show_labels.as_ref(), d.show_labels, "taylor.cor.show_labels")?,
        style: match c.style {
            Some(ref v) => parse_named(v, "taylor.cor.style")?,
            None => d.style,
        },
        width: c.width.unwrap_or(d.width),
        show_title: switch_or(c.show_title.as_ref(), d.show_title, "taylor.cor.show_title")?,
    })
}

fn build_obs_options(o: &ObsToml) -> Result<ObsOptions> {
    let d = ObsOptions::default();
    let marker = match o.marker.as_deref() {
        None => d.marker,
        Some(s) if s.trim().eq_ignore_ascii_case("none") => None,
        Some(s) => Some(parse_named(s, "taylor.obs.marker")?),
    };
    Ok(ObsOptions {
        color: color_or(o.color.as_ref(), d.color, "taylor.obs.color")?,
        marker,
        style: match o.style {
            Some(ref v) => parse_named(v, "taylor.obs.style")?,
            None => d.style,
        },
        title: o.title.clone().unwrap_or(d.title),
        width: o.width.unwrap_or(d.width),
    })
}

/// Builds [`TaylorOptions`] from the `[taylor]` table.
pub fn build_taylor_options(t: &TaylorToml) -> Result<TaylorOptions> {
    let mut cfg = TaylorOptions::default()
        .with_check_stats(switch_or(t.check_stats.as_ref(), false, "taylor.check_stats")?)
        .with_rms(build_rms_axis(&t.rms)?)
        .with_std(build_std_axis(&t.std)?)
        .with_cor(build_cor_axis(&t.cor)?)
        .with_obs(build_obs_options(&t.obs)?)
        .with_markers(build_marker_options(&t.markers, "taylor.markers")?);
    if let Some(v) = t.axis_max {
        cfg = cfg.with_axis_max(v);
    }
    if let Some(n) = t.number_panels {
        cfg = cfg.with_number_panels(n);
    }
    cfg.validate().context("invalid [taylor] options")?;
    Ok(cfg)
}
