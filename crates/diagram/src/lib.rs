//! Target and Taylor diagrams for model verification statistics.
//!
//! Diagrams are laid out into an explicit [`Figure`] as data-space
//! primitives (lines, text, markers, legend, color bar) and rendered to
//! SVG with [`Figure::to_svg_string`] or [`Figure::save_svg`]. Layout is
//! controlled by [`TargetOptions`] and [`TaylorOptions`]; overlays add
//! markers to a figure that already holds a diagram.
//!
//! ```
//! use skill_diagram::{Figure, TargetOptions, target_diagram};
//!
//! let mut figure = Figure::new();
//! target_diagram(&mut figure, &[0.2, -0.1], &[0.5, 0.8], &[0.54, 0.81], &TargetOptions::default())
//!     .unwrap();
//! assert_eq!(figure.markers().count(), 2);
//! ```

mod error;
mod figure;
mod markers;
mod options;
mod render;
mod style;
mod target;
mod taylor;
mod ticks;

pub use error::DiagramError;
pub use figure::{
    Colorbar, DEFAULT_WIDTH, DiagramKind, Extent, Figure, HAlign, LegendEntry, Marker, Polyline, Primitive,
    TextItem, VAlign, arc, dash_segments, split_runs,
};
pub use markers::{MAX_DEFAULT_MARKERS, default_markers, place_colorbar_markers, place_markers};
pub use options::{
    CorAxis, DEFAULT_LINE_WIDTH, MarkerOptions, ObsOptions, RmsAxis, StdAxis, TargetOptions, TaylorOptions,
};
pub use style::{Color, ColorbarLocation, Colormap, LineSpec, LineStyle, MarkerDisplay, MarkerSymbol, OnOff};
pub use target::{TargetAxes, target_diagram, target_diagram_axes};
pub use taylor::{TaylorAxes, default_cor_ticks, taylor_diagram, taylor_diagram_axes};
pub use ticks::{DEFAULT_NBINS, auto_ticks, axis_tick_label, max_n_locator, use_sci_notation};
