//! Common types shared across the csv-plot crates and service.

pub mod error;
pub mod format;
pub mod labels;
pub mod plot_type;
pub mod request;

pub use error::{PlotError, PlotResult, DETAIL_PREFIX};
pub use format::OutputFormat;
pub use labels::{AxisLabels, HEATMAP_TITLE};
pub use plot_type::{PlotSelection, PlotType};
pub use request::{
    FigureSize, LabelOverrides, PlotParams, PlotRequest, DEFAULT_DPI, DEFAULT_HEIGHT_IN,
    DEFAULT_WIDTH_IN, POINTS_PER_INCH,
};
