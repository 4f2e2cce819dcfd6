//! The figure handle that diagrams are laid out into.
//!
//! A [`Figure`] holds everything needed to draw a diagram in data
//! coordinates: its visible extent, an ordered list of primitives, legend
//! entries and an optional color bar. Layout code only appends to it; the
//! renderer turns it into SVG.

use crate::style::{Color, Colormap, ColorbarLocation, LineStyle, MarkerSymbol};

/// Default figure width in pixels. The height follows from the extent so
/// that both axes share one scale.
pub const DEFAULT_WIDTH: u32 = 800;

/// Which diagram a figure holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Target,
    Taylor,
}

/// Visible data window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.x.1 - self.x.0
    }

    pub fn height(&self) -> f64 {
        self.y.1 - self.y.0
    }

    /// Whether `(x, y)` lies inside the window.
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x.0 && x <= self.x.1 && y >= self.y.0 && y <= self.y.1
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A connected line through data points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub color: Color,
    pub style: LineStyle,
    /// Stroke width in pixels.
    pub width: f64,
}

/// A text label anchored at a data point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub position: (f64, f64),
    pub text: String,
    pub color: Color,
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
    /// Rotated to read bottom-to-top.
    pub vertical: bool,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextItem {
    /// Black, regular, centered text of the given size.
    pub fn new(position: (f64, f64), text: impl Into<String>, size: f64) -> Self {
        Self {
            position,
            text: text.into(),
            color: Color::BLACK,
            size,
            bold: false,
            vertical: false,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// A plotted experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: (f64, f64),
    pub symbol: MarkerSymbol,
    pub face: Color,
    pub edge: Color,
    /// Face opacity in `[0, 1]`.
    pub alpha: f64,
    /// Size in pixels.
    pub size: f64,
}

/// One legend line: a symbol sample and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub symbol: MarkerSymbol,
    pub color: Color,
}

/// Color scale shown next to color-mapped markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub colormap: Colormap,
    /// Data values mapped to the two ends of the color map.
    pub range: (f64, f64),
    pub location: ColorbarLocation,
    pub title: String,
    /// Tick positions (data values) and their labels.
    pub ticks: Vec<(f64, String)>,
}

/// A drawing primitive in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(Polyline),
    Text(TextItem),
    Marker(Marker),
}

/// Explicit figure handle passed to the diagram functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: u32,
    kind: Option<DiagramKind>,
    extent: Option<Extent>,
    axis_max: Option<f64>,
    primitives: Vec<Primitive>,
    legend: Vec<LegendEntry>,
    colorbar: Option<Colorbar>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Creates an empty figure of [`DEFAULT_WIDTH`] pixels.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            kind: None,
            extent: None,
            axis_max: None,
            primitives: Vec::new(),
            legend: Vec::new(),
            colorbar: None,
        }
    }

    /// Sets the width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Nominal height in pixels, from the width and the extent's aspect
    /// ratio. Rendering adds room for titles outside the extent.
    pub fn height(&self) -> u32 {
        match self.extent {
            Some(e) if e.width() > 0.0 => {
                (f64::from(self.width) * e.height() / e.width()).round().max(1.0) as u32
            }
            _ => self.width,
        }
    }

    /// The diagram laid out into this figure, if any.
    pub fn kind(&self) -> Option<DiagramKind> {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: DiagramKind) {
        self.kind = Some(kind);
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub(crate) fn set_extent(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    /// Axis maximum of the diagram drawn so far; overlays reuse it.
    pub fn axis_max(&self) -> Option<f64> {
        self.axis_max
    }

    pub(crate) fn set_axis_max(&mut self, axis_max: f64) {
        self.axis_max = Some(axis_max);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Iterates over the polylines in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(l) => Some(l),
            _ => None,
        })
    }

    /// Iterates over the text items in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Iterates over the markers in drawing order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker(m) => Some(m),
            _ => None,
        })
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Appends a line unless its style hides it or it has fewer than two
    /// points.
    pub fn push_line(&mut self, line: Polyline) {
        if line.style.is_visible() && line.points.len() >= 2 {
            self.primitives.push(Primitive::Line(line));
        }
    }

    pub fn push_text(&mut self, text: TextItem) {
        if !text.text.is_empty() {
            self.primitives.push(Primitive::Text(text));
        }
    }

    pub fn push_marker(&mut self, marker: Marker) {
        self.primitives.push(Primitive::Marker(marker));
    }

    pub fn push_legend(&mut self, entry: LegendEntry) {
        self.legend.push(entry);
    }

    pub(crate) fn set_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbar = Some(colorbar);
    }
}

/// Points `(r cos t + cx, r sin t)` for `n + 1` angles evenly spaced over
/// `[t0, t1]` (radians).
pub fn arc(center_x: f64, radius: f64, t0: f64, t1: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(1);
    (0..=n)
        .map(|i| {
            let t = t0 + (t1 - t0) * i as f64 / n as f64;
            (center_x + radius * t.cos(), radius * t.sin())
        })
        .collect()
}

/// Splits a polyline into the runs of consecutive points that satisfy
/// `keep`. Runs shorter than two points are dropped.
pub fn split_runs<F>(points: &[(f64, f64)], keep: F) -> Vec<Vec<(f64, f64)>>
where
    F: Fn((f64, f64)) -> bool,
{
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &p in points {
        if keep(p) {
            current.push(p);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs.retain(|r| r.len() >= 2);
    runs
}

/// Cuts a polyline into the "on" pieces of a dash pattern.
///
/// `pattern` alternates on/off lengths in data units and must have an
/// even number of positive entries; otherwise the line is returned whole.
pub fn dash_segments(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2
        || pattern.is_empty()
        || pattern.len() % 2 != 0
        || pattern.iter().any(|&p| p.is_nan() || p <= 0.0)
    {
        return vec![points.to_vec()];
    }

    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = vec![points[0]];
    let mut idx = 0;
    let mut left = pattern[0];

    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        while len > left {
            let t = left / len;
            let cut = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            if idx % 2 == 0 {
                current.push(cut);
                segments.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            len -= left;
            a = cut;
            idx = (idx + 1) % pattern.len();
            left = pattern[idx];
        }
        left -= len;
        if idx % 2 == 0 {
            current.push(b);
        }
    }
    if idx % 2 == 0 && current.len() >= 2 {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(points: Vec<(f64, f64)>, style: LineStyle) -> Polyline {
        Polyline {
            points,
            color: Color::BLACK,
            style,
            width: 1.0,
        }
    }

    #[test]
    fn test_push_line_skips_hidden_and_degenerate() {
        let mut fig = Figure::new();
        fig.push_line(line(vec![(0.0, 0.0), (1.0, 1.0)], LineStyle::None));
        fig.push_line(line(vec![(0.0, 0.0)], LineStyle::Solid));
        assert!(fig.is_empty());
        fig.push_line(line(vec![(0.0, 0.0), (1.0, 1.0)], LineStyle::Dashed));
        assert_eq!(fig.lines().count(), 1);
    }

    #[test]
    fn test_push_text_skips_empty() {
        let mut fig = Figure::new();
        fig.push_text(TextItem::new((0.0, 0.0), "", 10.0));
        assert!(fig.is_empty());
        fig.push_text(TextItem::new((0.0, 0.0), "Bias", 10.0));
        assert_eq!(fig.texts().next().map(|t| t.text.as_str()), Some("Bias"));
    }

    #[test]
    fn test_height_follows_extent() {
        let mut fig = Figure::new().with_width(600);
        assert_eq!(fig.height(), 600);
        fig.set_extent(Extent {
            x: (-2.0, 2.0),
            y: (0.0, 2.0),
        });
        assert_eq!(fig.height(), 300);
    }

    #[test]
    fn test_arc_endpoints() {
        let pts = arc(1.0, 2.0, 0.0, std::f64::consts::PI, 4);
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0].0, 3.0);
        assert_relative_eq!(pts[4].0, -1.0, epsilon = 1e-12);
        assert_relative_eq!(pts[2].1, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_split_runs() {
        let pts = [(0.0, 1.0), (1.0, 1.0), (2.0, -1.0), (3.0, 1.0), (4.0, 1.0), (5.0, 1.0)];
        let runs = split_runs(&pts, |(_, y)| y >= 0.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn test_dash_segments_straight_line() {
        // 10 units long, 2 on / 1 off -> dashes start at 0, 3, 6, 9
        let segs = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], &[2.0, 1.0]);
        assert_eq!(segs.len(), 4);
        assert_relative_eq!(segs[0][0].0, 0.0);
        assert_relative_eq!(segs[0].last().unwrap().0, 2.0);
        assert_relative_eq!(segs[1][0].0, 3.0);
        assert_relative_eq!(segs[3][0].0, 9.0);
        assert_relative_eq!(segs[3].last().unwrap().0, 10.0);
    }

    #[test]
    fn test_dash_segments_across_vertices() {
        let segs = dash_segments(&[(0.0, 0.0), (1.0, 0.0), (1.0, 3.0)], &[1.5, 1.0]);
        // first dash turns the corner
        assert_eq!(segs[0].len(), 3);
        assert_relative_eq!(segs[0][2].1, 0.5);
    }

    #[test]
    fn test_dash_segments_bad_pattern_returns_whole_line() {
        let pts = [(0.0, 0.0), (1.0, 0.0)];
        assert_eq!(dash_segments(&pts, &[1.0]), vec![pts.to_vec()]);
        assert_eq!(dash_segments(&pts, &[1.0, 0.0]), vec![pts.to_vec()]);
    }
}
