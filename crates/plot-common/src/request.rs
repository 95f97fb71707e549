//! Plot request parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::format::OutputFormat;
use crate::plot_type::PlotSelection;

/// Points per inch used for the scene coordinate system.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Default figure width in inches
pub const DEFAULT_WIDTH_IN: f64 = 10.0;

/// Default figure height in inches
pub const DEFAULT_HEIGHT_IN: f64 = 6.0;

/// Default output resolution
pub const DEFAULT_DPI: i64 = 300;

/// Raw plot parameters as submitted by a client.
///
/// Defaults match the form defaults of `POST /plot_csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotRequest {
    pub x_col: String,
    pub y_col: Option<String>,
    pub plot_type: String,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
    pub figsize_width: f64,
    pub figsize_height: f64,
    pub output_format: String,
    pub dpi: i64,
}

impl Default for PlotRequest {
    fn default() -> Self {
        Self {
            x_col: String::new(),
            y_col: None,
            plot_type: "line".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            title: String::new(),
            figsize_width: DEFAULT_WIDTH_IN,
            figsize_height: DEFAULT_HEIGHT_IN,
            output_format: "png".to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

/// Figure dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> PlotResult<Self> {
        for (param, value) in [("figsize_width", width), ("figsize_height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::invalid_parameter(
                    param,
                    format!("figure dimensions must be positive and finite, got {}", value),
                ));
            }
        }
        Ok(Self { width, height })
    }

    pub fn width_pt(&self) -> f64 {
        self.width * POINTS_PER_INCH
    }

    pub fn height_pt(&self) -> f64 {
        self.height * POINTS_PER_INCH
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_IN,
            height: DEFAULT_HEIGHT_IN,
        }
    }
}

/// Client-supplied label text; empty strings mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
}

/// Validated parameters ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotParams {
    pub selection: PlotSelection,
    pub x_col: String,
    pub y_col: Option<String>,
    pub labels: LabelOverrides,
    pub size: FigureSize,
    pub format: OutputFormat,
    pub dpi: u32,
}

impl PlotRequest {
    /// Validate the request before any rendering work starts.
    pub fn validate(&self) -> PlotResult<PlotParams> {
        let format = OutputFormat::from_tag(&self.output_format)?;
        let size = FigureSize::new(self.figsize_width, self.figsize_height)?;

        let dpi = u32::try_from(self.dpi)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| {
                PlotError::invalid_parameter(
                    "dpi",
                    format!("dpi must be a positive integer, got {}", self.dpi),
                )
            })?;

        Ok(PlotParams {
            selection: PlotSelection::resolve(&self.plot_type),
            x_col: self.x_col.clone(),
            y_col: self.y_col.clone().filter(|y| !y.is_empty()),
            labels: LabelOverrides {
                xlabel: non_empty(&self.xlabel),
                ylabel: non_empty(&self.ylabel),
                title: non_empty(&self.title),
            },
            size,
            format,
            dpi,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot_type::PlotType;

    fn request(x: &str) -> PlotRequest {
        PlotRequest {
            x_col: x.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let params = request("x").validate().unwrap();
        assert_eq!(params.selection.plot_type, PlotType::Line);
        assert_eq!(params.format, OutputFormat::Png);
        assert_eq!(params.size, FigureSize::new(10.0, 6.0).unwrap());
        assert_eq!(params.dpi, 300);
        assert_eq!(params.labels, LabelOverrides::default());
    }

    #[test]
    fn test_empty_y_col_is_absent() {
        let mut req = request("x");
        req.y_col = Some(String::new());
        assert_eq!(req.validate().unwrap().y_col, None);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut req = request("x");
        req.figsize_width = 0.0;
        assert!(req.validate().is_err());

        let mut req = request("x");
        req.figsize_height = f64::NAN;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_dpi() {
        for dpi in [0, -72] {
            let mut req = request("x");
            req.dpi = dpi;
            let err = req.validate().unwrap_err();
            assert_eq!(err.kind(), "invalid_parameter");
        }
    }

    #[test]
    fn test_rejects_format_before_anything_else() {
        let mut req = request("x");
        req.output_format = "bmp".to_string();
        req.dpi = 0;
        assert_eq!(req.validate().unwrap_err().kind(), "unsupported_format");
    }
}
