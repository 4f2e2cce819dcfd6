//! Colors, line styles, marker symbols and the switches used by the
//! diagram options.
//!
//! Every type parses from the short text codes common in plotting
//! configuration (`"k"`, `"--"`, `"o"`, `"on"`, ...) through [`FromStr`].

use std::fmt;
use std::str::FromStr;

use crate::error::DiagramError;

/// An opaque RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new_unchecked(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new_unchecked(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new_unchecked(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::new_unchecked(0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new_unchecked(0.0, 0.5, 0.0);
    pub const CYAN: Color = Color::new_unchecked(0.0, 0.75, 0.75);
    pub const MAGENTA: Color = Color::new_unchecked(0.75, 0.0, 0.75);
    pub const YELLOW: Color = Color::new_unchecked(0.75, 0.75, 0.0);
    /// Medium green of the Taylor RMS axis.
    pub const RMS_GREEN: Color = Color::new_unchecked(0.0, 0.6, 0.0);

    const fn new_unchecked(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from components in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidOption`] if a component is outside
    /// `[0, 1]` or not finite.
    pub fn rgb(r: f64, g: f64, b: f64) -> Result<Self, DiagramError> {
        for v in [r, g, b] {
            if !(0.0..=1.0).contains(&v) {
                return Err(DiagramError::InvalidOption {
                    option: "color",
                    reason: format!("RGB components must lie in [0, 1], got ({r}, {g}, {b})"),
                });
            }
        }
        Ok(Self { r, g, b })
    }

    /// Components as `(r, g, b)` in `[0, 1]`.
    pub fn components(&self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }

    /// Components scaled to 8 bits.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |v: f64| (v * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Color::BLACK),
            'w' => Some(Color::WHITE),
            'r' => Some(Color::RED),
            'b' => Some(Color::BLUE),
            'g' => Some(Color::GREEN),
            'c' => Some(Color::CYAN),
            'm' => Some(Color::MAGENTA),
            'y' => Some(Color::YELLOW),
            _ => None,
        }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        Some(Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        })
    }
}

impl FromStr for Color {
    type Err = DiagramError;

    /// Accepts single-letter codes (`k w r g b c m y`), the matching
    /// English names (`"black"`, `"magenta"`, ...) and `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        let mut chars = t.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_code(c),
            _ => match t.as_str() {
                "black" => Some(Color::BLACK),
                "white" => Some(Color::WHITE),
                "red" => Some(Color::RED),
                "blue" => Some(Color::BLUE),
                "green" => Some(Color::GREEN),
                "cyan" => Some(Color::new_unchecked(0.0, 1.0, 1.0)),
                "magenta" => Some(Color::new_unchecked(1.0, 0.0, 1.0)),
                "yellow" => Some(Color::new_unchecked(1.0, 1.0, 0.0)),
                other => other.strip_prefix('#').and_then(Color::from_hex),
            },
        };
        parsed.ok_or_else(|| DiagramError::UnrecognizedValue {
            kind: "color",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Stroke pattern of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// `-.`
    DashDot,
    /// Empty string or `none`: the line is not drawn.
    None,
}

impl LineStyle {
    /// Dash pattern as alternating on/off lengths, in units of 1/400 of
    /// the figure width. `None` for solid and hidden lines.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid | LineStyle::None => None,
            LineStyle::Dashed => Some(&[4.0, 2.5]),
            LineStyle::Dotted => Some(&[0.8, 1.6]),
            LineStyle::DashDot => Some(&[4.0, 1.6, 0.8, 1.6]),
        }
    }

    /// Returns `false` for [`LineStyle::None`].
    pub fn is_visible(&self) -> bool {
        *self != LineStyle::None
    }

    fn code(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::Dotted => ":",
            LineStyle::DashDot => "-.",
            LineStyle::None => "",
        }
    }
}

impl FromStr for LineStyle {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            "" | "none" => Ok(LineStyle::None),
            _ => Err(DiagramError::UnrecognizedValue {
                kind: "line style",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Combined color and style code such as `"k--"` or `"-.b"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpec {
    pub color: Color,
    pub style: LineStyle,
}

impl FromStr for LineSpec {
    type Err = DiagramError;

    /// The color letter may come before or after the style; a missing
    /// color means black, a missing style means solid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || DiagramError::UnrecognizedValue {
            kind: "line spec",
            value: s.to_string(),
        };
        let (color, style) = match t.find(|c: char| c.is_ascii_alphabetic()) {
            Some(i) => {
                let code = t[i..].chars().next().ok_or_else(err)?;
                let color = Color::from_code(code).ok_or_else(err)?;
                let rest = format!("{}{}", &t[..i], &t[i + code.len_utf8()..]);
                (color, rest)
            }
            None => (Color::BLACK, t.to_string()),
        };
        let style = if style.is_empty() {
            LineStyle::Solid
        } else {
            style.parse::<LineStyle>().map_err(|_| err())?
        };
        Ok(Self { color, style })
    }
}

/// Marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSymbol {
    /// `+`
    Plus,
    /// `o`
    Circle,
    /// `x`
    Cross,
    /// `s`
    Square,
    /// `d`
    Diamond,
    /// `^`
    TriangleUp,
    /// `v`
    TriangleDown,
    /// `p`
    Pentagon,
    /// `h`
    Hexagon,
    /// `*`
    Star,
    /// `.`
    Point,
}

impl MarkerSymbol {
    /// Single-character code.
    pub fn code(&self) -> char {
        match self {
            MarkerSymbol::Plus => '+',
            MarkerSymbol::Circle => 'o',
            MarkerSymbol::Cross => 'x',
            MarkerSymbol::Square => 's',
            MarkerSymbol::Diamond => 'd',
            MarkerSymbol::TriangleUp => '^',
            MarkerSymbol::TriangleDown => 'v',
            MarkerSymbol::Pentagon => 'p',
            MarkerSymbol::Hexagon => 'h',
            MarkerSymbol::Star => '*',
            MarkerSymbol::Point => '.',
        }
    }

    /// Line-only symbols have no face to fill.
    pub fn is_filled(&self) -> bool {
        !matches!(self, MarkerSymbol::Plus | MarkerSymbol::Cross | MarkerSymbol::Star)
    }
}

impl FromStr for MarkerSymbol {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = match s.trim() {
            "+" => MarkerSymbol::Plus,
            "o" => MarkerSymbol::Circle,
            "x" => MarkerSymbol::Cross,
            "s" => MarkerSymbol::Square,
            "d" | "D" => MarkerSymbol::Diamond,
            "^" => MarkerSymbol::TriangleUp,
            "v" => MarkerSymbol::TriangleDown,
            "p" => MarkerSymbol::Pentagon,
            "h" | "H" => MarkerSymbol::Hexagon,
            "*" => MarkerSymbol::Star,
            "." => MarkerSymbol::Point,
            _ => {
                return Err(DiagramError::UnrecognizedValue {
                    kind: "marker symbol",
                    value: s.to_string(),
                });
            }
        };
        Ok(symbol)
    }
}

impl fmt::Display for MarkerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An `"on"` / `"off"` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOff {
    On,
    Off,
}

impl OnOff {
    pub fn is_on(&self) -> bool {
        *self == OnOff::On
    }
}

impl From<bool> for OnOff {
    fn from(b: bool) -> Self {
        if b { OnOff::On } else { OnOff::Off }
    }
}

impl From<OnOff> for bool {
    fn from(v: OnOff) -> Self {
        v.is_on()
    }
}

impl FromStr for OnOff {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" => Ok(OnOff::On),
            "off" | "false" => Ok(OnOff::Off),
            _ => Err(DiagramError::UnrecognizedValue {
                kind: "on/off switch",
                value: s.to_string(),
            }),
        }
    }
}

/// How experiments are represented on a diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerDisplay {
    /// One symbol per experiment.
    #[default]
    Marker,
    /// Color-mapped symbols with a color bar.
    ColorBar,
}

impl FromStr for MarkerDisplay {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marker" => Ok(MarkerDisplay::Marker),
            "colorbar" => Ok(MarkerDisplay::ColorBar),
            _ => Err(DiagramError::UnrecognizedValue {
                kind: "marker display",
                value: s.to_string(),
            }),
        }
    }
}

/// Where the color bar sits relative to the diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorbarLocation {
    #[default]
    NorthOutside,
    EastOutside,
}

impl FromStr for ColorbarLocation {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northoutside" => Ok(ColorbarLocation::NorthOutside),
            "eastoutside" => Ok(ColorbarLocation::EastOutside),
            _ => Err(DiagramError::UnrecognizedValue {
                kind: "color bar location",
                value: s.to_string(),
            }),
        }
    }
}

/// Color map for color-bar marker display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Colormap {
    #[default]
    Jet,
    Gray,
}

impl Colormap {
    /// Color at position `t` in `[0, 1]`; `t` is clamped.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Jet => {
                let four_t = 4.0 * t;
                let r = (1.5 - (four_t - 3.0).abs()).clamp(0.0, 1.0);
                let g = (1.5 - (four_t - 2.0).abs()).clamp(0.0, 1.0);
                let b = (1.5 - (four_t - 1.0).abs()).clamp(0.0, 1.0);
                Color::new_unchecked(r, g, b)
            }
            Colormap::Gray => Color::new_unchecked(t, t, t),
        }
    }
}

impl FromStr for Colormap {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jet" => Ok(Colormap::Jet),
            "gray" | "grey" => Ok(Colormap::Gray),
            _ => Err(DiagramError::UnrecognizedValue {
                kind: "color map",
                value: s.to_string(),
            }),
        }
    }
}
