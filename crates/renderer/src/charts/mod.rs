//! Chart bodies and the plot-type dispatcher.
//!
//! Every chart draws into a fresh [`Figure`]. The title is placed by the
//! figure; axis descriptions and the grid go through the plotters mesh
//! from [`AxisLabels`], so the chart routines only deal with data.

mod bar;
mod distribution;
mod heatmap;
mod pie;
mod series;

use csv_parser::{Column, ColumnData, Frame};
use plot_common::{AxisLabels, PlotError, PlotParams, PlotResult, PlotType};
use tracing::{debug, warn};

use crate::axes::Axis;
use crate::figure::Figure;

/// Build the figure for `params` from `frame`.
///
/// Unrecognized plot-type tags were already mapped to [`PlotType::Line`]
/// when the request was validated; for those the y column is optional and
/// x is plotted against itself when absent.
pub fn render_figure(frame: &Frame, params: &PlotParams) -> PlotResult<Figure> {
    let x = params.x_col.as_str();
    let y = params.y_col.as_deref();
    let plot_type = params.selection.plot_type;
    let labels = AxisLabels::for_params(params);

    if params.selection.is_fallback() {
        warn!(x_col = %x, y_col = ?y, "Unknown plot type, drawing a line plot");
    }
    let required_y = || y.ok_or_else(|| require_y(plot_type));
    let line_y = match (plot_type, y) {
        (PlotType::Line, Some(y)) => Some(y),
        (PlotType::Line, None) if params.selection.is_fallback() => Some(x),
        (PlotType::Line, None) => return Err(require_y(plot_type)),
        _ => None,
    };
    debug!(plot_type = %plot_type, rows = frame.num_rows(), "Rendering chart body");

    Figure::draw(params.size, &labels.title, |root| match plot_type {
        PlotType::Line => series::line(root, frame, x, line_y.unwrap_or(x), &labels),
        PlotType::Scatter => series::scatter(root, frame, x, required_y()?, &labels),
        PlotType::Area => series::area(root, frame, x, required_y()?, &labels),
        PlotType::Bar => bar::bar(root, frame, x, required_y()?, &labels),
        PlotType::Pie => pie::pie(root, frame, x, required_y()?),
        PlotType::Histogram => distribution::histogram(root, frame, x, &labels),
        PlotType::Box => match y {
            Some(y) => distribution::grouped_box(root, frame, x, y, &labels),
            None => distribution::single_box(root, frame, x, &labels),
        },
        PlotType::Violin => match y {
            Some(y) => distribution::grouped_violin(root, frame, x, y, &labels),
            None => distribution::single_violin(root, frame, x, &labels),
        },
        PlotType::Heatmap => heatmap::heatmap(root, frame),
    })
}

fn require_y(plot_type: PlotType) -> PlotError {
    PlotError::MissingColumn(format!("y_col is required for {} plots", plot_type))
}

/// Numeric view of a named column.
fn numeric<'a>(frame: &'a Frame, name: &str) -> PlotResult<&'a [f64]> {
    Ok(frame.column(name)?.as_numeric()?)
}

/// Row positions along x.
///
/// Numeric columns map to their values; text columns map each row to the
/// index of its category (order of first appearance) and carry the
/// category labels for the axis.
struct XPositions {
    values: Vec<f64>,
    labels: Option<Vec<String>>,
}

impl XPositions {
    fn from_column(column: &Column) -> Self {
        match column.data() {
            ColumnData::Numeric(values) => Self {
                values: values.clone(),
                labels: None,
            },
            ColumnData::Text(_) => {
                let categories = column.categories();
                let values = (0..column.len())
                    .map(|row| {
                        column
                            .key_at(row)
                            .and_then(|key| categories.iter().position(|c| *c == key))
                            .map_or(f64::NAN, |i| i as f64)
                    })
                    .collect();
                Self {
                    values,
                    labels: Some(categories.iter().map(|c| c.to_string()).collect()),
                }
            }
        }
    }

    /// Axis over the given x extent; text columns get one slot per category.
    fn axis(&self, lo: f64, hi: f64) -> Axis {
        match &self.labels {
            Some(labels) => Axis::categories(labels.clone()),
            None => Axis::linear(lo, hi),
        }
    }
}

/// Min and max of the finite values, `(NaN, NaN)` when there are none.
fn finite_extent(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_positions_follow_appearance() {
        let frame = Frame::from_csv_bytes(b"k,v\nb,1\na,2\n,3\nb,4\n").unwrap();
        let positions = XPositions::from_column(frame.column("k").unwrap());
        assert_eq!(positions.labels, Some(vec!["b".to_string(), "a".to_string()]));
        assert_eq!(positions.values[0], 0.0);
        assert_eq!(positions.values[1], 1.0);
        assert!(positions.values[2].is_nan());
        assert_eq!(positions.values[3], 0.0);
    }

    #[test]
    fn test_finite_extent() {
        assert_eq!(finite_extent([3.0, f64::NAN, -1.0]), (-1.0, 3.0));
        let (lo, hi) = finite_extent([f64::NAN]);
        assert!(lo.is_nan() && hi.is_nan());
    }
}
