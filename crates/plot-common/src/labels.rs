//! Axis label, title and grid defaults per plot type.

use crate::plot_type::PlotType;
use crate::request::{LabelOverrides, PlotParams};

/// Title used when a heatmap has no explicit title.
pub const HEATMAP_TITLE: &str = "Correlation Heatmap";

/// Decorations applied after the chart body is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: String,
    pub grid: bool,
}

impl AxisLabels {
    /// Resolve labels for a plot.
    ///
    /// Heatmap and pie get neither axis labels nor a grid. Every other type
    /// labels x with the override or the column name, and labels y the same
    /// way when a y column is given and the type is not a histogram.
    pub fn resolve(
        plot_type: PlotType,
        x_col: &str,
        y_col: Option<&str>,
        overrides: &LabelOverrides,
    ) -> Self {
        let (xlabel, ylabel) = if plot_type.uses_axes() {
            let xlabel = overrides.xlabel.clone().unwrap_or_else(|| x_col.to_string());
            let ylabel = match y_col {
                Some(y) if plot_type != PlotType::Histogram => {
                    Some(overrides.ylabel.clone().unwrap_or_else(|| y.to_string()))
                }
                _ => None,
            };
            (Some(xlabel), ylabel)
        } else {
            (None, None)
        };

        let title = match (&overrides.title, plot_type, y_col) {
            (Some(title), _, _) => title.clone(),
            (None, PlotType::Heatmap, _) => HEATMAP_TITLE.to_string(),
            (None, PlotType::Histogram, _) => format!("Distribution of {}", x_col),
            (None, _, Some(y)) => format!("{} vs {}", y, x_col),
            (None, _, None) => x_col.to_string(),
        };

        Self {
            xlabel,
            ylabel,
            title,
            grid: plot_type.uses_axes(),
        }
    }

    pub fn for_params(params: &PlotParams) -> Self {
        Self::resolve(
            params.selection.plot_type,
            &params.x_col,
            params.y_col.as_deref(),
            &params.labels,
        )
    }
}
