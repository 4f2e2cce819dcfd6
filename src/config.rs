//! TOML configuration of a model comparison.
//!
//! Every table rejects unknown keys. Option values that name a style
//! (colors, line styles, marker symbols, switches) stay textual here and
//! are parsed in [`crate::convert`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillConfig {
    /// Target diagram settings.
    #[serde(default)]
    pub target: TargetToml,

    /// Taylor diagram settings.
    #[serde(default)]
    pub taylor: TaylorToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl SkillConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

/// A color as a name, a one-letter code, `#rrggbb`, or `[r, g, b]` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorToml {
    Name(String),
    Rgb([f64; 3]),
}

/// An on/off switch given as a boolean or as `"on"` / `"off"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SwitchToml {
    Bool(bool),
    Text(String),
}

/// Marker settings shared by both diagrams (`[target.markers]`,
/// `[taylor.markers]`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkersToml {
    pub alpha: Option<f64>,
    /// `"marker"` or `"colorbar"`.
    pub display: Option<String>,
    /// Marker labels; the model names when empty.
    #[serde(default)]
    pub labels: Vec<String>,
    pub label_color: Option<ColorToml>,
    pub color: Option<ColorToml>,
    pub legend: Option<SwitchToml>,
    pub size: Option<f64>,
    pub symbol: Option<String>,
    pub colormap: Option<SwitchToml>,
    pub cmap: Option<String>,
    pub cmap_range: Option<[f64; 2]>,
    pub cmap_marker: Option<String>,
    #[serde(default)]
    pub cmap_zdata: Vec<f64>,
    pub colorbar_location: Option<String>,
    pub colorbar_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    pub axis_max: Option<f64>,
    /// Line spec of the reference circles, e.g. `"k--"`.
    pub circle_line_spec: Option<String>,
    pub circle_line_width: Option<f64>,
    #[serde(default)]
    pub circles: Vec<f64>,
    pub equal_axes: Option<SwitchToml>,
    /// Normalize the statistics by the reference standard deviation and
    /// draw the normalized circles.
    pub normalized: Option<SwitchToml>,
    pub obs_uncertainty: Option<f64>,
    #[serde(default)]
    pub ticks: Vec<f64>,
    #[serde(default)]
    pub xtick_label_pos: Vec<f64>,
    #[serde(default)]
    pub ytick_label_pos: Vec<f64>,
    /// Relative tolerance under which two models count as overlapping
    /// markers.
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
    #[serde(default)]
    pub markers: MarkersToml,
}

impl Default for TargetToml {
    fn default() -> Self {
        Self {
            axis_max: None,
            circle_line_spec: None,
            circle_line_width: None,
            circles: Vec::new(),
            equal_axes: None,
            normalized: None,
            obs_uncertainty: None,
            ticks: Vec::new(),
            xtick_label_pos: Vec::new(),
            ytick_label_pos: Vec::new(),
            duplicate_threshold: default_duplicate_threshold(),
            markers: MarkersToml::default(),
        }
    }
}

fn default_duplicate_threshold() -> f64 {
    0.01
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaylorToml {
    pub axis_max: Option<f64>,
    pub check_stats: Option<SwitchToml>,
    pub number_panels: Option<u8>,
    #[serde(default)]
    pub rms: RmsToml,
    #[serde(default)]
    pub std: StdToml,
    #[serde(default)]
    pub cor: CorToml,
    #[serde(default)]
    pub obs: ObsToml,
    #[serde(default)]
    pub markers: MarkersToml,
}

/// `[taylor.rms]`: arcs of constant centered RMS difference.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RmsToml {
    #[serde(default)]
    pub ticks: Vec<f64>,
    pub color: Option<ColorToml>,
    pub show_labels: Option<SwitchToml>,
    pub label_angle: Option<f64>,
    pub label_precision: Option<usize>,
    pub style: Option<String>,
    pub width: Option<f64>,
    pub label: Option<String>,
    pub show_title: Option<SwitchToml>,
    pub title_angle: Option<f64>,
}

/// `[taylor.std]`: arcs of constant standard deviation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StdToml {
    #[serde(default)]
    pub ticks: Vec<f64>,
    pub color: Option<ColorToml>,
    pub show_labels: Option<SwitchToml>,
    pub style: Option<String>,
    pub width: Option<f64>,
    pub show_title: Option<SwitchToml>,
}

/// `[taylor.cor]`: rays of constant correlation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorToml {
    pub ticks: Option<Vec<f64>>,
    pub color: Option<ColorToml>,
    pub show_labels: Option<SwitchToml>,
    pub style: Option<String>,
    pub width: Option<f64>,
    pub show_title: Option<SwitchToml>,
}

/// `[taylor.obs]`: the reference point.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObsToml {
    pub color: Option<ColorToml>,
    pub marker: Option<String>,
    pub style: Option<String>,
    pub title: Option<String>,
    pub width: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// Directory for `target.svg`, `taylor.svg` and `statistics.json`;
    /// nothing is written when unset.
    pub dir: Option<PathBuf>,
    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Title of the statistics report.
    #[serde(default = "default_title")]
    pub title: String,
    /// Label of the reference series in the report.
    #[serde(default = "default_reference_label")]
    pub reference_label: String,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: None,
            width: default_width(),
            title: default_title(),
            reference_label: default_reference_label(),
        }
    }
}

fn default_width() -> u32 {
    skill_diagram::DEFAULT_WIDTH
}
fn default_title() -> String {
    "skill".to_string()
}
fn default_reference_label() -> String {
    "Reference".to_string()
}
