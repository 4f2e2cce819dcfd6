//! SVG rendering of a laid-out [`Figure`] through plotters.
//!
//! Data coordinates map to pixels with one scale for both axes. The
//! drawing window covers the figure extent plus every primitive, so titles
//! placed outside the axes stay visible.

use std::f64::consts::PI;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::prelude::SVGBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontStyle, FontTransform, IntoFont, RGBColor, TextStyle, WHITE};
use tracing::debug;

use crate::error::DiagramError;
use crate::figure::{Colorbar, Figure, HAlign, Marker, Polyline, TextItem, VAlign, dash_segments};
use crate::style::{Color, ColorbarLocation, MarkerSymbol};

/// Blank border around the drawing window in pixels.
const PADDING: f64 = 56.0;
/// Pixels reserved for a color bar.
const COLORBAR_BAND: u32 = 80;
/// Largest plot height as a multiple of the plot width.
const MAX_ASPECT: f64 = 8.0;
const COLORBAR_THICKNESS: i32 = 14;
const COLORBAR_STEPS: usize = 64;
const LEGEND_FONT_SIZE: f64 = 12.0;
const FONT_FAMILY: &str = "sans-serif";

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Maps data coordinates to pixels of the plot area.
#[derive(Debug, Clone, Copy)]
struct Transform {
    x0: f64,
    y1: f64,
    scale: f64,
}

impl Transform {
    fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            PADDING + (x - self.x0) * self.scale,
            PADDING + (self.y1 - y) * self.scale,
        )
    }

    fn pixel(&self, p: (f64, f64)) -> (i32, i32) {
        let (x, y) = self.apply(p);
        (x.round() as i32, y.round() as i32)
    }
}

/// Pixel geometry of a rendered figure.
#[derive(Debug, Clone, Copy)]
struct Layout {
    width: u32,
    height: u32,
    plot_width: u32,
    legend_width: u32,
    transform: Transform,
}

impl Layout {
    fn new(figure: &Figure) -> Result<Self, DiagramError> {
        let ((x0, x1), (y0, y1)) = data_bounds(figure).ok_or_else(|| DiagramError::Render {
            reason: "figure has nothing to draw".to_string(),
        })?;
        let (bw, bh) = (x1 - x0, y1 - y0);
        if !(bw > 0.0 && bh > 0.0) {
            return Err(DiagramError::DegenerateAxis {
                reason: format!("drawing window is {bw} by {bh}"),
            });
        }

        let width = figure.width();
        let legend_width = legend_width(figure);
        let east_band = match figure.colorbar() {
            Some(c) if c.location == ColorbarLocation::EastOutside => COLORBAR_BAND,
            _ => 0,
        };
        let north_band = match figure.colorbar() {
            Some(c) if c.location == ColorbarLocation::NorthOutside => COLORBAR_BAND,
            _ => 0,
        };
        let reserved = 2.0 * PADDING + f64::from(legend_width + east_band);
        let available = f64::from(width) - reserved;
        if available < 1.0 {
            return Err(DiagramError::Render {
                reason: format!("figure width {width} leaves no room for the plot"),
            });
        }
        let scale = available / bw;
        let plot_height = bh * scale;
        if plot_height > MAX_ASPECT * available {
            return Err(DiagramError::Render {
                reason: format!(
                    "drawing window is {bw} by {bh}, more than {MAX_ASPECT} times taller than wide"
                ),
            });
        }
        let plot_width = (available + 2.0 * PADDING).round() as u32;
        let height = (plot_height + 2.0 * PADDING).round() as u32 + north_band;

        Ok(Self {
            width,
            height,
            plot_width,
            legend_width,
            transform: Transform { x0, y1, scale },
        })
    }
}

impl Figure {
    /// Renders the figure as an SVG document.
    ///
    /// # Errors
    ///
    /// [`DiagramError::Render`] for an empty figure, a window more than eight
    /// times taller than wide, or a backend failure.
    pub fn to_svg_string(&self) -> Result<String, DiagramError> {
        let layout = Layout::new(self)?;
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let (bar_area, plot_area) = match self.colorbar() {
                Some(c) if c.location == ColorbarLocation::NorthOutside => {
                    let (top, rest) = root.split_vertically(COLORBAR_BAND);
                    (Some(top), rest)
                }
                Some(c) if c.location == ColorbarLocation::EastOutside => {
                    let (rest, side) = root.split_horizontally(layout.plot_width + layout.legend_width);
                    (Some(side), rest)
                }
                _ => (None, root.clone()),
            };

            let scale = f64::from(self.width()) / 400.0;
            for line in self.lines() {
                draw_polyline(&plot_area, &layout.transform, line, scale)?;
            }
            for text in self.texts() {
                draw_text(&plot_area, text, layout.transform.pixel(text.position))?;
            }
            for marker in self.markers() {
                draw_marker(&plot_area, marker, layout.transform.pixel(marker.position))?;
            }
            if !self.legend().is_empty() {
                draw_legend(&plot_area, self, &layout)?;
            }
            if let (Some(area), Some(bar)) = (bar_area, self.colorbar()) {
                draw_colorbar(&area, bar)?;
            }
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }

    /// Renders the figure and writes it to `path`.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<(), DiagramError> {
        let path = path.as_ref();
        let svg = self.to_svg_string()?;
        std::fs::write(path, svg).map_err(|source| DiagramError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote figure");
        Ok(())
    }
}

fn render_err(e: impl std::fmt::Display) -> DiagramError {
    DiagramError::Render {
        reason: e.to_string(),
    }
}

fn data_bounds(figure: &Figure) -> Option<((f64, f64), (f64, f64))> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    if let Some(e) = figure.extent() {
        points.push((e.x.0, e.y.0));
        points.push((e.x.1, e.y.1));
    }
    for line in figure.lines() {
        points.extend(&line.points);
    }
    points.extend(figure.texts().map(|t| t.position));
    points.extend(figure.markers().map(|m| m.position));

    let mut iter = points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite());
    let (x, y) = iter.next()?;
    let bounds = iter.fold(((x, x), (y, y)), |((x0, x1), (y0, y1)), (x, y)| {
        ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y)))
    });
    Some(bounds)
}

fn rgb(color: Color) -> RGBColor {
    let (r, g, b) = color.to_rgb8();
    RGBColor(r, g, b)
}

fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

fn draw_polyline(area: &Area<'_>, t: &Transform, line: &Polyline, scale: f64) -> Result<(), DiagramError> {
    let style = rgb(line.color).stroke_width(stroke(line.width));
    let pixels: Vec<(f64, f64)> = line.points.iter().map(|&p| t.apply(p)).collect();
    let pieces = match line.style.dash_pattern() {
        Some(pattern) => {
            let pattern: Vec<f64> = pattern.iter().map(|p| p * scale).collect();
            dash_segments(&pixels, &pattern)
        }
        None => vec![pixels],
    };
    for piece in pieces {
        let coords: Vec<(i32, i32)> = piece
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        area.draw(&PathElement::new(coords, style)).map_err(render_err)?;
    }
    Ok(())
}

fn text_style(item: &TextItem) -> TextStyle<'static> {
    let font = if item.bold {
        (FONT_FAMILY, item.size, FontStyle::Bold).into_font()
    } else {
        (FONT_FAMILY, item.size).into_font()
    };
    let font = if item.vertical {
        font.transform(FontTransform::Rotate270)
    } else {
        font
    };
    let h = match item.h_align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match item.v_align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    font.color(&rgb(item.color)).pos(Pos::new(h, v))
}

fn draw_text(area: &Area<'_>, item: &TextItem, pos: (i32, i32)) -> Result<(), DiagramError> {
    area.draw(&Text::new(item.text.clone(), pos, text_style(item)))
        .map_err(render_err)
}

/// Vertices of a regular polygon of radius `r` about `c`, the first one
/// at `start` radians (screen y points down).
fn regular_polygon(c: (i32, i32), r: f64, sides: usize, start: f64) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|k| {
            let a = start + 2.0 * PI * k as f64 / sides as f64;
            (
                c.0 + (r * a.cos()).round() as i32,
                c.1 - (r * a.sin()).round() as i32,
            )
        })
        .collect()
}

fn draw_marker(area: &Area<'_>, marker: &Marker, c: (i32, i32)) -> Result<(), DiagramError> {
    let r = (marker.size / 2.0).max(1.0);
    let ri = r.round() as i32;
    let face = rgb(marker.face).mix(marker.alpha).filled();
    let edge = rgb(marker.edge).stroke_width(1);
    let bar = rgb(marker.edge).stroke_width(2);

    let outline = match marker.symbol {
        MarkerSymbol::Circle | MarkerSymbol::Point => {
            let radius = if marker.symbol == MarkerSymbol::Point { (r / 3.0).max(1.0) } else { r };
            let radius = radius.round() as u32;
            area.draw(&Circle::new(c, radius, face)).map_err(render_err)?;
            area.draw(&Circle::new(c, radius, edge)).map_err(render_err)?;
            return Ok(());
        }
        MarkerSymbol::Square => {
            let corners = [(c.0 - ri, c.1 - ri), (c.0 + ri, c.1 + ri)];
            area.draw(&Rectangle::new(corners, face)).map_err(render_err)?;
            area.draw(&Rectangle::new(corners, edge)).map_err(render_err)?;
            return Ok(());
        }
        MarkerSymbol::Diamond => regular_polygon(c, r, 4, PI / 2.0),
        MarkerSymbol::TriangleUp => regular_polygon(c, r, 3, PI / 2.0),
        MarkerSymbol::TriangleDown => regular_polygon(c, r, 3, -PI / 2.0),
        MarkerSymbol::Pentagon => regular_polygon(c, r, 5, PI / 2.0),
        MarkerSymbol::Hexagon => regular_polygon(c, r, 6, PI / 2.0),
        MarkerSymbol::Plus | MarkerSymbol::Cross | MarkerSymbol::Star => {
            let mut angles = Vec::new();
            if marker.symbol != MarkerSymbol::Cross {
                angles.extend([0.0, PI / 2.0]);
            }
            if marker.symbol != MarkerSymbol::Plus {
                angles.extend([PI / 4.0, 3.0 * PI / 4.0]);
            }
            for a in angles {
                let (dx, dy) = ((r * f64::cos(a)).round() as i32, (r * f64::sin(a)).round() as i32);
                area.draw(&PathElement::new(vec![(c.0 - dx, c.1 + dy), (c.0 + dx, c.1 - dy)], bar))
                    .map_err(render_err)?;
            }
            return Ok(());
        }
    };
    area.draw(&Polygon::new(outline.clone(), face)).map_err(render_err)?;
    let mut closed = outline;
    if let Some(&first) = closed.first() {
        closed.push(first);
    }
    area.draw(&PathElement::new(closed, edge)).map_err(render_err)
}

fn legend_width(figure: &Figure) -> u32 {
    let longest = figure
        .legend()
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    if longest == 0 {
        0
    } else {
        (40.0 + longest as f64 * LEGEND_FONT_SIZE * 0.6).round() as u32
    }
}

fn draw_legend(area: &Area<'_>, figure: &Figure, layout: &Layout) -> Result<(), DiagramError> {
    let row = (LEGEND_FONT_SIZE * 1.8).round() as i32;
    let x0 = layout.plot_width as i32;
    let y0 = PADDING as i32;
    let x1 = x0 + layout.legend_width as i32 - 8;
    let y1 = y0 + row * figure.legend().len() as i32 + row / 2;
    area.draw(&Rectangle::new([(x0, y0), (x1, y1)], WHITE.filled()))
        .map_err(render_err)?;
    area.draw(&Rectangle::new([(x0, y0), (x1, y1)], RGBColor(128, 128, 128).stroke_width(1)))
        .map_err(render_err)?;

    for (i, entry) in figure.legend().iter().enumerate() {
        let y = y0 + row * i as i32 + row * 3 / 4;
        let sample = Marker {
            position: (0.0, 0.0),
            symbol: entry.symbol,
            face: entry.color,
            edge: entry.color,
            alpha: 1.0,
            size: LEGEND_FONT_SIZE * 0.8,
        };
        draw_marker(area, &sample, (x0 + 14, y))?;
        let label = TextItem::new((0.0, 0.0), entry.label.clone(), LEGEND_FONT_SIZE)
            .with_align(HAlign::Left, VAlign::Center);
        draw_text(area, &label, (x0 + 28, y))?;
    }
    Ok(())
}

fn draw_colorbar(area: &Area<'_>, bar: &Colorbar) -> Result<(), DiagramError> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let (vmin, vmax) = bar.range;
    let span = vmax - vmin;
    let frac = |v: f64| if span > 0.0 { ((v - vmin) / span).clamp(0.0, 1.0) } else { 0.5 };
    let black = RGBColor(0, 0, 0);
    let tick_text = |text: &str, h: HAlign, v: VAlign| {
        TextItem::new((0.0, 0.0), text.to_string(), LEGEND_FONT_SIZE).with_align(h, v)
    };

    match bar.location {
        ColorbarLocation::NorthOutside => {
            let x0 = w / 4;
            let len = w / 2;
            let y0 = h - COLORBAR_THICKNESS - 8;
            for k in 0..COLORBAR_STEPS {
                let a = x0 + len * k as i32 / COLORBAR_STEPS as i32;
                let b = x0 + len * (k as i32 + 1) / COLORBAR_STEPS as i32;
                let t = (k as f64 + 0.5) / COLORBAR_STEPS as f64;
                area.draw(&Rectangle::new(
                    [(a, y0), (b, y0 + COLORBAR_THICKNESS)],
                    rgb(bar.colormap.sample(t)).filled(),
                ))
                .map_err(render_err)?;
            }
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + len, y0 + COLORBAR_THICKNESS)],
                black.stroke_width(1),
            ))
            .map_err(render_err)?;
            for (value, label) in &bar.ticks {
                let x = x0 + (frac(*value) * len as f64).round() as i32;
                let item = tick_text(label, HAlign::Center, VAlign::Bottom);
                draw_text(area, &item, (x, y0 - 2))?;
            }
            let title = TextItem::new((0.0, 0.0), bar.title.clone(), LEGEND_FONT_SIZE)
                .with_align(HAlign::Center, VAlign::Bottom);
            draw_text(area, &title, (w / 2, y0 - 6 - LEGEND_FONT_SIZE as i32 - 2))?;
        }
        ColorbarLocation::EastOutside => {
            let y0 = h / 4;
            let len = h / 2;
            let x0 = 8;
            for k in 0..COLORBAR_STEPS {
                let a = y0 + len - len * (k as i32 + 1) / COLORBAR_STEPS as i32;
                let b = y0 + len - len * k as i32 / COLORBAR_STEPS as i32;
                let t = (k as f64 + 0.5) / COLORBAR_STEPS as f64;
                area.draw(&Rectangle::new(
                    [(x0, a), (x0 + COLORBAR_THICKNESS, b)],
                    rgb(bar.colormap.sample(t)).filled(),
                ))
                .map_err(render_err)?;
            }
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + COLORBAR_THICKNESS, y0 + len)],
                black.stroke_width(1),
            ))
            .map_err(render_err)?;
            for (value, label) in &bar.ticks {
                let y = y0 + len - (frac(*value) * len as f64).round() as i32;
                let item = tick_text(label, HAlign::Left, VAlign::Center);
                draw_text(area, &item, (x0 + COLORBAR_THICKNESS + 4, y))?;
            }
            let title = TextItem::new((0.0, 0.0), bar.title.clone(), LEGEND_FONT_SIZE)
                .with_align(HAlign::Left, VAlign::Bottom);
            draw_text(area, &title, (x0, y0 - 8))?;
        }
    }
    Ok(())
}
