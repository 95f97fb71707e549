//! Pie chart of the per-group sum.

use std::f64::consts::PI;

use csv_parser::{Aggregation, Frame};
use plot_common::{PlotError, PlotResult};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::axes::TICK_FONT;
use crate::color::category_color;
use crate::figure::{RenderResultExt, Root, FONT_FAMILY};

/// Radius as a fraction of half the shorter side of the drawing area.
const RADIUS_FRACTION: f64 = 0.8;

/// Category labels sit at this multiple of the radius.
const LABEL_DISTANCE: f64 = 1.1;

/// Percentage labels sit at this multiple of the radius.
const PCT_DISTANCE: f64 = 0.6;

/// Arc points per full turn when approximating a wedge.
const ARC_STEPS: f64 = 180.0;

/// Wedge sizes as fractions of the total, validated.
fn fractions(frame: &Frame, x_col: &str, y_col: &str) -> PlotResult<Vec<(String, f64)>> {
    let groups = frame.group_by(x_col, y_col, Aggregation::Sum)?;
    if let Some((key, value)) = groups.iter().find(|(_, v)| *v < 0.0) {
        return Err(PlotError::InvalidData(format!(
            "wedge sizes must be non-negative, group '{}' sums to {}",
            key, value
        )));
    }
    let total: f64 = groups.iter().map(|(_, v)| v).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(PlotError::InvalidData(format!(
            "cannot draw a pie whose values sum to {}",
            total
        )));
    }
    Ok(groups
        .into_iter()
        .map(|(key, value)| (key.to_string(), value / total))
        .collect())
}

/// One wedge per distinct x value sized by the sum of y.
///
/// Wedges start at 3 o'clock and run counter-clockwise in sorted key
/// order. The pie stays circular whatever the figure's aspect ratio.
pub fn pie(root: &Root<'_>, frame: &Frame, x_col: &str, y_col: &str) -> PlotResult<()> {
    let wedges = fractions(frame, x_col, y_col)?;

    let (width, height) = root.dim_in_pixel();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 / 2.0 * RADIUS_FRACTION;
    // counter-clockwise on screen means subtracting from y
    let at = |angle: f64, distance: f64| {
        (
            (cx + distance * radius * angle.cos()).round() as i32,
            (cy - distance * radius * angle.sin()).round() as i32,
        )
    };

    let font = (FONT_FAMILY, TICK_FONT).into_font().color(&BLACK);
    let mut start = 0.0;

    for (slot, (key, fraction)) in wedges.iter().enumerate() {
        let sweep = fraction * 2.0 * PI;
        let end = start + sweep;
        let style = category_color(slot).filled();

        if sweep >= 2.0 * PI - 1e-12 {
            root.draw(&Circle::new(at(0.0, 0.0), radius.round() as u32, style))
                .or_render_error()?;
        } else if sweep > 0.0 {
            let steps = ((sweep / (2.0 * PI) * ARC_STEPS).ceil() as usize).max(2);
            let mut outline = vec![at(0.0, 0.0)];
            outline.extend((0..=steps).map(|i| at(start + sweep * i as f64 / steps as f64, 1.0)));
            root.draw(&Polygon::new(outline, style)).or_render_error()?;
        }

        let mid = start + sweep / 2.0;
        let side = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
        root.draw(&Text::new(
            key.clone(),
            at(mid, LABEL_DISTANCE),
            font.pos(Pos::new(side, VPos::Center)),
        ))
        .or_render_error()?;
        root.draw(&Text::new(
            format!("{:.1}%", fraction * 100.0),
            at(mid, PCT_DISTANCE),
            font.pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .or_render_error()?;
        start = end;
    }

    Ok(())
}
