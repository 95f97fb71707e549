//! Chart rendering for the CSV plotting service.
//!
//! Draws one of nine chart kinds from a parsed [`csv_parser::Frame`] with
//! plotters into an SVG document, then serializes it:
//! - svg: the document itself
//! - png/jpg/pdf: the document rasterized with resvg, trimmed to its
//!   content, then encoded

pub mod axes;
pub mod charts;
pub mod color;
pub mod encode;
pub mod figure;
pub mod pdf;
pub mod png;
pub mod raster;
pub mod stats;

pub use charts::render_figure;
pub use encode::{encode, Artifact, JPEG_QUALITY, TRIM_PAD_PT};
pub use figure::{Figure, SvgDocument};
pub use raster::DrawingContext;

use csv_parser::Frame;
use plot_common::{PlotParams, PlotResult};

/// Draw the chart described by `params` and encode it.
pub fn render_plot(frame: &Frame, params: &PlotParams, ctx: &DrawingContext) -> PlotResult<Artifact> {
    let figure = render_figure(frame, params)?;
    encode(figure, params.format, params.dpi, ctx)
}
