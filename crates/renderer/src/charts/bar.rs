//! Bar chart of the per-group mean.

use csv_parser::{Aggregation, Frame};
use plot_common::{AxisLabels, PlotResult};
use plotters::prelude::*;

use super::finite_extent;
use crate::axes::{cartesian, Axis};
use crate::color::SERIES_COLOR;
use crate::figure::{RenderResultExt, Root};

/// Bar width in x units; one category slot is 1 wide.
pub const BAR_WIDTH: f64 = 0.8;

/// Bar geometry in data coordinates.
#[derive(Debug, Clone, PartialEq)]
struct BarLayout {
    x: Axis,
    y: Axis,
    /// Bar centre and height; a group without values has a `NaN` height.
    bars: Vec<(f64, f64)>,
}

impl BarLayout {
    /// One bar per distinct x value in sorted key order.
    ///
    /// Numeric keys sit at their own value on a linear axis, so uneven
    /// gaps between keys stay visible. Text keys take one slot each.
    fn compute(frame: &Frame, x_col: &str, y_col: &str) -> PlotResult<Self> {
        let groups = frame.group_by(x_col, y_col, Aggregation::Mean)?;
        tracing::debug!(groups = groups.len(), "Aggregated bar groups");

        let (lo, hi) = finite_extent(groups.iter().map(|(_, v)| *v));
        let y = Axis::from_zero(lo, hi);
        let half = BAR_WIDTH / 2.0;

        let numeric_keys: Option<Vec<f64>> = groups.iter().map(|(key, _)| key.as_number()).collect();
        let (x, centers) = match numeric_keys {
            Some(keys) if !keys.is_empty() => {
                let (k_lo, k_hi) = finite_extent(keys.iter().copied());
                (Axis::linear(k_lo - half, k_hi + half), keys)
            }
            _ => {
                let names = groups.iter().map(|(key, _)| key.to_string()).collect();
                let slots = (0..groups.len()).map(|i| i as f64).collect();
                (Axis::categories(names), slots)
            }
        };

        let bars = centers
            .into_iter()
            .zip(groups.iter().map(|(_, mean)| *mean))
            .collect();
        Ok(Self { x, y, bars })
    }
}

/// One bar per distinct x value, height = mean of y within the group.
///
/// A group with no numeric values leaves its position empty.
pub fn bar(root: &Root<'_>, frame: &Frame, x_col: &str, y_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let layout = BarLayout::compute(frame, x_col, y_col)?;
    let mut chart = cartesian(root, &layout.x, &layout.y, labels)?;

    let half = BAR_WIDTH / 2.0;
    chart
        .draw_series(
            layout
                .bars
                .iter()
                .filter(|(_, mean)| mean.is_finite())
                .map(|&(center, mean)| {
                    Rectangle::new([(center - half, 0.0), (center + half, mean)], SERIES_COLOR.filled())
                }),
        )
        .or_render_error()?;
    Ok(())
}
