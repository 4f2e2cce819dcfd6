//! Typed option sets for the target and Taylor diagrams.
//!
//! Both diagrams share [`MarkerOptions`]. The Taylor diagram groups its
//! per-axis settings in [`RmsAxis`], [`StdAxis`], [`CorAxis`] and
//! [`ObsOptions`]. Every struct has the documented defaults through
//! `Default` and is checked by `validate` before layout.

use crate::error::DiagramError;
use crate::style::{Color, ColorbarLocation, Colormap, LineSpec, LineStyle, MarkerDisplay, MarkerSymbol};

/// Default line width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.5;

/// How experiments are drawn. Shared by both diagrams.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    /// Face opacity, `0.0` transparent through `1.0` opaque.
    pub alpha: f64,
    /// Individual symbols or a color bar.
    pub display: MarkerDisplay,
    /// One label per experiment. Drawn next to markers, or in the legend
    /// when `legend` is set.
    pub labels: Vec<String>,
    pub label_color: Color,
    /// Single color for all markers outside legend mode.
    pub color: Color,
    /// Use a legend with the default symbol and color cycle.
    pub legend: bool,
    /// Marker size in pixels.
    pub size: f64,
    /// Symbol for all markers outside legend mode.
    pub symbol: MarkerSymbol,
    /// Color bar mode: shade by the color map (`true`) or label only the
    /// minimum and maximum of the data (`false`).
    pub colormap: bool,
    pub cmap: Colormap,
    /// Fixed color scale limits; the data range when `None`.
    pub cmap_range: Option<(f64, f64)>,
    pub cmap_marker: MarkerSymbol,
    /// Values used for color mapping instead of the default statistic.
    pub cmap_zdata: Vec<f64>,
    pub colorbar_location: ColorbarLocation,
    pub colorbar_title: String,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            display: MarkerDisplay::Marker,
            labels: Vec::new(),
            label_color: Color::BLACK,
            color: Color::RED,
            legend: false,
            size: 10.0,
            symbol: MarkerSymbol::Circle,
            colormap: true,
            cmap: Colormap::Jet,
            cmap_range: None,
            cmap_marker: MarkerSymbol::Diamond,
            cmap_zdata: Vec::new(),
            colorbar_location: ColorbarLocation::NorthOutside,
            colorbar_title: String::new(),
        }
    }
}

impl MarkerOptions {
    /// Validates ranges of the numeric settings.
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid("alpha", format!("must lie in [0, 1], got {}", self.alpha)));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(invalid("markersize", format!("must be positive, got {}", self.size)));
        }
        if let Some((lo, hi)) = self.cmap_range
            && !(lo.is_finite() && hi.is_finite() && lo < hi)
        {
            return Err(invalid(
                "cmap_range",
                format!("needs finite vmin < vmax, got ({lo}, {hi})"),
            ));
        }
        if self.cmap_zdata.iter().any(|z| !z.is_finite()) {
            return Err(invalid("cmapzdata", "values must be finite".to_string()));
        }
        Ok(())
    }
}

/// Options for [`target_diagram`](crate::target_diagram).
///
/// # Example
///
/// ```
/// use skill_diagram::TargetOptions;
///
/// let options = TargetOptions::default()
///     .with_axis_max(2.0)
///     .with_circles(vec![1.0, 2.0])
///     .with_obs_uncertainty(0.3);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOptions {
    /// Maximum of both axes; 0 selects it from the data.
    axis_max: f64,
    /// Color and style of the reference circles.
    circle_spec: LineSpec,
    circle_line_width: f64,
    /// Radii of the reference circles; empty selects `[0.7, 1] * axis_max`.
    circles: Vec<f64>,
    equal_axes: bool,
    /// Normalized statistics: circles at 0.5 and 1 plus a solid unit circle.
    normalized: bool,
    /// Radius of the observational-uncertainty circle; 0 hides it.
    obs_uncertainty: f64,
    /// Only add markers to an existing diagram.
    overlay: bool,
    /// Explicit tick values for both axes.
    ticks: Vec<f64>,
    /// Tick values that carry a label on the x axis; empty labels all.
    xtick_label_pos: Vec<f64>,
    /// Tick values that carry a label on the y axis; empty labels all.
    ytick_label_pos: Vec<f64>,
    markers: MarkerOptions,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            axis_max: 0.0,
            circle_spec: LineSpec {
                color: Color::BLACK,
                style: LineStyle::Dashed,
            },
            circle_line_width: DEFAULT_LINE_WIDTH,
            circles: Vec::new(),
            equal_axes: true,
            normalized: false,
            obs_uncertainty: 0.0,
            overlay: false,
            ticks: Vec::new(),
            xtick_label_pos: Vec::new(),
            ytick_label_pos: Vec::new(),
            markers: MarkerOptions::default(),
        }
    }
}

impl TargetOptions {
    pub fn with_axis_max(mut self, axis_max: f64) -> Self {
        self.axis_max = axis_max;
        self
    }

    pub fn with_circle_spec(mut self, spec: LineSpec) -> Self {
        self.circle_spec = spec;
        self
    }

    pub fn with_circle_line_width(mut self, width: f64) -> Self {
        self.circle_line_width = width;
        self
    }

    pub fn with_circles(mut self, circles: Vec<f64>) -> Self {
        self.circles = circles;
        self
    }

    pub fn with_equal_axes(mut self, on: bool) -> Self {
        self.equal_axes = on;
        self
    }

    pub fn with_normalized(mut self, on: bool) -> Self {
        self.normalized = on;
        self
    }

    pub fn with_obs_uncertainty(mut self, radius: f64) -> Self {
        self.obs_uncertainty = radius;
        self
    }

    pub fn with_overlay(mut self, on: bool) -> Self {
        self.overlay = on;
        self
    }

    pub fn with_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_xtick_label_pos(mut self, pos: Vec<f64>) -> Self {
        self.xtick_label_pos = pos;
        self
    }

    pub fn with_ytick_label_pos(mut self, pos: Vec<f64>) -> Self {
        self.ytick_label_pos = pos;
        self
    }

    pub fn with_markers(mut self, markers: MarkerOptions) -> Self {
        self.markers = markers;
        self
    }

    pub fn axis_max(&self) -> f64 {
        self.axis_max
    }

    pub fn circle_spec(&self) -> LineSpec {
        self.circle_spec
    }

    pub fn circle_line_width(&self) -> f64 {
        self.circle_line_width
    }

    pub fn circles(&self) -> &[f64] {
        &self.circles
    }

    pub fn equal_axes(&self) -> bool {
        self.equal_axes
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    pub fn obs_uncertainty(&self) -> f64 {
        self.obs_uncertainty
    }

    pub fn overlay(&self) -> bool {
        self.overlay
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn xtick_label_pos(&self) -> &[f64] {
        &self.xtick_label_pos
    }

    pub fn ytick_label_pos(&self) -> &[f64] {
        &self.ytick_label_pos
    }

    pub fn markers(&self) -> &MarkerOptions {
        &self.markers
    }

    /// Validates this configuration.
    ///
    /// Returns an error for a negative or non-finite axis maximum or
    /// uncertainty radius, non-positive circle radii, unsorted or
    /// non-finite ticks, and invalid marker settings.
    pub fn validate(&self) -> Result<(), DiagramError> {
        check_non_negative("axismax", self.axis_max)?;
        check_non_negative("obsuncertainty", self.obs_uncertainty)?;
        check_positive("circlelinewidth", self.circle_line_width)?;
        if let Some(&c) = self.circles.iter().find(|c| !c.is_finite() || **c <= 0.0) {
            return Err(invalid("circles", format!("radii must be positive, got {c}")));
        }
        check_ticks("ticks", &self.ticks)?;
        if self.ticks.len() == 1 {
            return Err(invalid("ticks", "needs at least two values".to_string()));
        }
        self.markers.validate()
    }
}

/// Centered-RMS axis of the Taylor diagram: arcs about the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct RmsAxis {
    /// Radii of the RMS arcs; empty selects them from the data.
    pub ticks: Vec<f64>,
    pub color: Color,
    pub show_labels: bool,
    /// Angle (degrees) of the arc labels about the reference point; `None`
    /// places them where the arcs meet the outer standard deviation arc.
    pub label_angle: Option<f64>,
    /// Decimal places of the arc labels; `None` prints them in full.
    pub label_precision: Option<usize>,
    pub style: LineStyle,
    pub width: f64,
    /// Axis title drawn along an arc.
    pub label: String,
    pub show_title: bool,
    /// Angle (degrees) about the reference point at which the title is
    /// centered.
    pub title_angle: f64,
}

impl Default for RmsAxis {
    fn default() -> Self {
        Self {
            ticks: Vec::new(),
            color: Color::RMS_GREEN,
            show_labels: true,
            label_angle: None,
            label_precision: None,
            style: LineStyle::Dashed,
            width: DEFAULT_LINE_WIDTH,
            label: "RMSD".to_string(),
            show_title: true,
            title_angle: 160.0,
        }
    }
}

/// Standard deviation axis: arcs about the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StdAxis {
    /// Radii of the standard deviation arcs; empty selects them from the
    /// data.
    pub ticks: Vec<f64>,
    pub color: Color,
    pub show_labels: bool,
    pub style: LineStyle,
    pub width: f64,
    pub show_title: bool,
}

impl Default for StdAxis {
    fn default() -> Self {
        Self {
            ticks: Vec::new(),
            color: Color::BLACK,
            show_labels: true,
            style: LineStyle::Dotted,
            width: DEFAULT_LINE_WIDTH,
            show_title: true,
        }
    }
}

/// Correlation axis: rays from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CorAxis {
    /// Correlations at which rays are drawn; `None` selects the default
    /// set for the number of panels.
    pub ticks: Option<Vec<f64>>,
    pub color: Color,
    pub show_labels: bool,
    pub style: LineStyle,
    pub width: f64,
    pub show_title: bool,
}

impl Default for CorAxis {
    fn default() -> Self {
        Self {
            ticks: None,
            color: Color::BLUE,
            show_labels: true,
            style: LineStyle::DashDot,
            width: DEFAULT_LINE_WIDTH,
            show_title: true,
        }
    }
}

/// Presentation of the reference (observation) point.
#[derive(Debug, Clone, PartialEq)]
pub struct ObsOptions {
    pub color: Color,
    /// Marker on the x axis at the reference standard deviation; `None`
    /// hides it.
    pub marker: Option<MarkerSymbol>,
    /// Style of the arc through the reference point; hidden by default.
    pub style: LineStyle,
    /// Label under the reference point.
    pub title: String,
    pub width: f64,
}

impl Default for ObsOptions {
    fn default() -> Self {
        Self {
            color: Color::MAGENTA,
            marker: None,
            style: LineStyle::None,
            title: String::new(),
            width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Options for [`taylor_diagram`](crate::taylor_diagram).
///
/// # Example
///
/// ```
/// use skill_diagram::{StdAxis, TaylorOptions};
///
/// let options = TaylorOptions::default()
///     .with_check_stats(true)
///     .with_std(StdAxis {
///         ticks: vec![0.5, 1.0, 1.5],
///         ..StdAxis::default()
///     });
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaylorOptions {
    /// Maximum radius; 0 selects it from the data.
    axis_max: f64,
    /// Check the Taylor relation before drawing.
    check_stats: bool,
    /// 1 (positive correlations) or 2 (all correlations); `None` decides
    /// from the data.
    number_panels: Option<u8>,
    overlay: bool,
    rms: RmsAxis,
    std: StdAxis,
    cor: CorAxis,
    obs: ObsOptions,
    markers: MarkerOptions,
}

impl TaylorOptions {
    pub fn with_axis_max(mut self, axis_max: f64) -> Self {
        self.axis_max = axis_max;
        self
    }

    pub fn with_check_stats(mut self, on: bool) -> Self {
        self.check_stats = on;
        self
    }

    pub fn with_number_panels(mut self, panels: u8) -> Self {
        self.number_panels = Some(panels);
        self
    }

    pub fn with_overlay(mut self, on: bool) -> Self {
        self.overlay = on;
        self
    }

    pub fn with_rms(mut self, rms: RmsAxis) -> Self {
        self.rms = rms;
        self
    }

    pub fn with_std(mut self, std: StdAxis) -> Self {
        self.std = std;
        self
    }

    pub fn with_cor(mut self, cor: CorAxis) -> Self {
        self.cor = cor;
        self
    }

    pub fn with_obs(mut self, obs: ObsOptions) -> Self {
        self.obs = obs;
        self
    }

    pub fn with_markers(mut self, markers: MarkerOptions) -> Self {
        self.markers = markers;
        self
    }

    pub fn axis_max(&self) -> f64 {
        self.axis_max
    }

    pub fn check_stats(&self) -> bool {
        self.check_stats
    }

    pub fn number_panels(&self) -> Option<u8> {
        self.number_panels
    }

    pub fn overlay(&self) -> bool {
        self.overlay
    }

    pub fn rms(&self) -> &RmsAxis {
        &self.rms
    }

    pub fn std(&self) -> &StdAxis {
        &self.std
    }

    pub fn cor(&self) -> &CorAxis {
        &self.cor
    }

    pub fn obs(&self) -> &ObsOptions {
        &self.obs
    }

    pub fn markers(&self) -> &MarkerOptions {
        &self.markers
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), DiagramError> {
        check_non_negative("axismax", self.axis_max)?;
        if let Some(n) = self.number_panels
            && n != 1
            && n != 2
        {
            return Err(invalid("numberpanels", format!("must be 1 or 2, got {n}")));
        }
        check_tick_radii("tickrms", &self.rms.ticks)?;
        check_tick_radii("tickstd", &self.std.ticks)?;
        if let Some(ticks) = &self.cor.ticks {
            if let Some(&c) = ticks.iter().find(|c| !(-1.0..=1.0).contains(*c)) {
                return Err(invalid("tickcor", format!("correlations must lie in [-1, 1], got {c}")));
            }
        }
        if let Some(angle) = self.rms.label_angle {
            check_finite("tickrmsangle", angle)?;
        }
        check_finite("titlermsdangle", self.rms.title_angle)?;
        for (name, width) in [
            ("widthrms", self.rms.width),
            ("widthstd", self.std.width),
            ("widthcor", self.cor.width),
            ("widthobs", self.obs.width),
        ] {
            check_positive(name, width)?;
        }
        self.markers.validate()
    }
}

fn invalid(option: &'static str, reason: String) -> DiagramError {
    DiagramError::InvalidOption { option, reason }
}

fn check_finite(option: &'static str, value: f64) -> Result<(), DiagramError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(option, format!("must be finite, got {value}")))
    }
}

fn check_non_negative(option: &'static str, value: f64) -> Result<(), DiagramError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(option, format!("must be finite and non-negative, got {value}")))
    }
}

fn check_positive(option: &'static str, value: f64) -> Result<(), DiagramError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(option, format!("must be positive, got {value}")))
    }
}

fn check_ticks(option: &'static str, ticks: &[f64]) -> Result<(), DiagramError> {
    if ticks.iter().any(|t| !t.is_finite()) {
        return Err(invalid(option, "values must be finite".to_string()));
    }
    if ticks.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid(option, "values must be strictly increasing".to_string()));
    }
    Ok(())
}

fn check_tick_radii(option: &'static str, ticks: &[f64]) -> Result<(), DiagramError> {
    if let Some(&t) = ticks.iter().find(|t| !t.is_finite() || **t <= 0.0) {
        return Err(invalid(option, format!("radii must be positive, got {t}")));
    }
    Ok(())
}
