//! Row-ordered x/y series: line, scatter and area.

use csv_parser::Frame;
use plot_common::{AxisLabels, PlotResult};
use plotters::prelude::*;

use super::{finite_extent, numeric, XPositions};
use crate::axes::{cartesian, Axis};
use crate::color::SERIES_COLOR;
use crate::figure::{RenderResultExt, Root};

pub const LINE_WIDTH: u32 = 2;

/// Scatter marker radius in backend units.
pub const MARKER_RADIUS: u32 = 3;

pub const AREA_ALPHA: f64 = 0.7;

struct Series {
    x: XPositions,
    y: Vec<f64>,
}

impl Series {
    fn load(frame: &Frame, x_col: &str, y_col: &str) -> PlotResult<Self> {
        let x = XPositions::from_column(frame.column(x_col)?);
        let y = numeric(frame, y_col)?.to_vec();
        Ok(Self { x, y })
    }

    fn points(&self) -> impl Iterator<Item = Option<(f64, f64)>> + '_ {
        self.x.values.iter().zip(&self.y).map(|(&x, &y)| {
            if x.is_finite() && y.is_finite() {
                Some((x, y))
            } else {
                None
            }
        })
    }

    /// Runs of consecutive complete rows.
    fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in self.points() {
            match point {
                Some(p) => current.push(p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn axes(&self, include_zero: bool) -> (Axis, Axis) {
        let complete: Vec<(f64, f64)> = self.points().flatten().collect();
        let (x_lo, x_hi) = finite_extent(complete.iter().map(|p| p.0));
        let (mut y_lo, mut y_hi) = finite_extent(complete.iter().map(|p| p.1));
        if include_zero && y_lo.is_finite() {
            y_lo = y_lo.min(0.0);
            y_hi = y_hi.max(0.0);
        }
        (self.x.axis(x_lo, x_hi), Axis::linear(y_lo, y_hi))
    }
}

fn line_style() -> ShapeStyle {
    SERIES_COLOR.stroke_width(LINE_WIDTH)
}

/// Connected line through the rows in file order; gaps break the line.
pub fn line(root: &Root<'_>, frame: &Frame, x_col: &str, y_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let series = Series::load(frame, x_col, y_col)?;
    let (x, y) = series.axes(false);
    let mut chart = cartesian(root, &x, &y, labels)?;
    for segment in series.segments().into_iter().filter(|s| s.len() > 1) {
        chart
            .draw_series(LineSeries::new(segment, line_style()))
            .or_render_error()?;
    }
    Ok(())
}

/// One unconnected marker per complete row.
pub fn scatter(root: &Root<'_>, frame: &Frame, x_col: &str, y_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let series = Series::load(frame, x_col, y_col)?;
    let (x, y) = series.axes(false);
    let mut chart = cartesian(root, &x, &y, labels)?;
    chart
        .draw_series(
            series
                .points()
                .flatten()
                .map(|p| Circle::new(p, MARKER_RADIUS, SERIES_COLOR.filled())),
        )
        .or_render_error()?;
    Ok(())
}

/// Region between the line and `y = 0`, with the line drawn on top.
pub fn area(root: &Root<'_>, frame: &Frame, x_col: &str, y_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let series = Series::load(frame, x_col, y_col)?;
    let (x, y) = series.axes(true);
    let mut chart = cartesian(root, &x, &y, labels)?;
    let segments = series.segments();

    let fill = SERIES_COLOR.mix(AREA_ALPHA).filled();
    chart
        .draw_series(segments.iter().filter(|s| s.len() > 1).filter_map(|segment| {
            let (first, last) = (segment.first()?, segment.last()?);
            let mut outline = segment.clone();
            outline.push((last.0, 0.0));
            outline.push((first.0, 0.0));
            Some(Polygon::new(outline, fill))
        }))
        .or_render_error()?;
    for segment in segments.into_iter().filter(|s| s.len() > 1) {
        chart
            .draw_series(LineSeries::new(segment, line_style()))
            .or_render_error()?;
    }
    Ok(())
}
