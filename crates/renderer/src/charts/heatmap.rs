//! Annotated correlation heatmap over every numeric column.

use csv_parser::Frame;
use plot_common::{AxisLabels, PlotError, PlotResult};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::axes::{cartesian, Axis, TICK_FONT};
use crate::color::{centered_norm, contrasting_text, coolwarm};
use crate::figure::{RenderResultExt, Root, FONT_FAMILY};

/// Width kept on the right for the colour bar and its labels.
const COLORBAR_WIDTH: u32 = 72;

const COLORBAR_LABEL_AREA: u32 = 40;

/// Number of bands used to draw the colour bar gradient.
const COLORBAR_STEPS: usize = 64;

/// Pearson correlation matrix coloured with `coolwarm` centred on zero.
///
/// x and y columns are ignored. Cells are annotated with the coefficient;
/// undefined coefficients leave their cell blank. Row 0 is drawn on top.
pub fn heatmap(root: &Root<'_>, frame: &Frame) -> PlotResult<()> {
    let matrix = frame.correlation();
    if matrix.is_empty() {
        return Err(PlotError::EmptyData(
            "no numeric columns to correlate".to_string(),
        ));
    }

    let limit = matrix
        .finite_range()
        .map(|(lo, hi)| lo.abs().max(hi.abs()))
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0);
    let color_at = |value: f64| coolwarm(centered_norm(value, -limit, limit, 0.0));

    let (width, _) = root.dim_in_pixel();
    let (grid_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let n = matrix.len();
    let x = Axis::categories(matrix.labels.clone());
    let y = Axis::categories(matrix.labels.iter().rev().cloned().collect());
    let bare = AxisLabels {
        xlabel: None,
        ylabel: None,
        title: String::new(),
        grid: false,
    };
    let chart = cartesian(&grid_area, &x, &y, &bare)?;
    let cells = chart.plotting_area();
    let centered = Pos::new(HPos::Center, VPos::Center);

    for row in 0..n {
        let cy = (n - 1 - row) as f64;
        for col in 0..n {
            let value = matrix.get(row, col);
            if !value.is_finite() {
                continue;
            }
            let cx = col as f64;
            let fill = color_at(value);
            cells
                .draw(&Rectangle::new([(cx - 0.5, cy - 0.5), (cx + 0.5, cy + 0.5)], fill.filled()))
                .or_render_error()?;
            let text = (FONT_FAMILY, TICK_FONT)
                .into_font()
                .color(&contrasting_text(fill))
                .pos(centered);
            cells
                .draw(&Text::new(format_significant(value, 2), (cx, cy), text))
                .or_render_error()?;
        }
    }

    draw_colorbar(&bar_area, limit)?;
    tracing::debug!(columns = n, limit, "Drew correlation heatmap");
    Ok(())
}

/// Vertical gradient over `[-limit, limit]` with value labels on its right.
fn draw_colorbar(area: &Root<'_>, limit: f64) -> PlotResult<()> {
    let mut bar = ChartBuilder::on(area)
        .margin(8)
        .set_label_area_size(LabelAreaPosition::Right, COLORBAR_LABEL_AREA)
        .build_cartesian_2d(0.0..1.0, -limit..limit)
        .or_render_error()?;

    let band = 2.0 * limit / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|step| {
        let lo = -limit + step as f64 * band;
        let t = (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + band)], coolwarm(t).filled())
    }))
    .or_render_error()?;

    let format = |v: &f64| format!("{:.1}", v);
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&format)
        .label_style((FONT_FAMILY, TICK_FONT))
        .draw()
        .or_render_error()?;
    Ok(())
}

/// Format with `digits` significant digits, dropping trailing zeros.
///
/// Very small or large magnitudes switch to exponent notation.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    // exponent after rounding, so 0.999 -> 1 counts as 10^0
    let rounded: f64 = format!("{:.*e}", digits - 1, value).parse().unwrap_or(value);
    let exponent = rounded.abs().log10().floor() as i32;

    if exponent < -4 || exponent >= digits as i32 {
        return format!("{:.*e}", digits - 1, value);
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let mut out = format!("{:.*}", decimals, rounded);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}
