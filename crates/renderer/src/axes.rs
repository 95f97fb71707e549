//! Axis ranges and the cartesian chart shared by every x/y plot type.

use std::ops::Range;

use plot_common::{AxisLabels, PlotResult};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::color::GRID_COLOR;
use crate::figure::{RenderResultExt, Root, FONT_FAMILY};

/// Fraction of the data span added on each side of an autoscaled axis.
pub const AXIS_MARGIN: f64 = 0.05;

/// Tick label size in backend units (10pt in the SVG output).
pub const TICK_FONT: f64 = 12.4;

/// Axis description size in backend units.
pub const LABEL_FONT: f64 = 12.4;

pub const GRID_ALPHA: f64 = 0.3;

const CHART_MARGIN: u32 = 8;

/// A plotters chart over two linear f64 axes.
pub type Chart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// How an axis is labelled.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticks {
    /// Numeric ticks chosen by plotters.
    Auto,
    /// One label per integer position, `0..names.len()`.
    Categories(Vec<String>),
}

/// One axis: visible data range plus how its ticks are labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Ticks,
}

impl Axis {
    /// Autoscale to the finite values in `[lo, hi]` with a 5 % margin.
    ///
    /// Non-finite bounds fall back to `[0, 1]`; a zero span is widened
    /// around the single value.
    pub fn linear(lo: f64, hi: f64) -> Self {
        let (lo, hi) = if lo.is_finite() && hi.is_finite() {
            (lo, hi)
        } else {
            (0.0, 1.0)
        };
        let (min, max) = if hi > lo {
            let pad = (hi - lo) * AXIS_MARGIN;
            (lo - pad, hi + pad)
        } else {
            let delta = if lo == 0.0 { 0.05 } else { lo.abs() * 0.05 };
            (lo - delta, hi + delta)
        };
        Self::with_range(min, max)
    }

    /// Linear axis over exactly `[min, max]`.
    pub fn with_range(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ticks: Ticks::Auto,
        }
    }

    /// Linear axis that keeps zero as a hard edge when the data sits on one
    /// side of it, the way bars and histograms are usually framed.
    pub fn from_zero(lo: f64, hi: f64) -> Self {
        let lo = if lo.is_finite() { lo.min(0.0) } else { 0.0 };
        let hi = if hi.is_finite() { hi.max(0.0) } else { 1.0 };
        let padded = Self::linear(lo, hi);
        match (lo == 0.0, hi == 0.0) {
            (true, false) => Self::with_range(0.0, padded.max),
            (false, true) => Self::with_range(padded.min, 0.0),
            _ => padded,
        }
    }

    /// One slot per name, centred on `0, 1, ..`.
    ///
    /// The range runs half a slot past either end, which also makes the
    /// plotters key points land exactly on the slot centres.
    pub fn categories(names: Vec<String>) -> Self {
        let slots = names.len().max(1) as f64;
        Self {
            min: -0.5,
            max: slots - 0.5,
            ticks: Ticks::Categories(names),
        }
    }

    pub fn range(&self) -> Range<f64> {
        self.min..self.max
    }

    /// Category names when the axis is categorical.
    pub fn names(&self) -> Option<&[String]> {
        match &self.ticks {
            Ticks::Categories(names) => Some(names),
            Ticks::Auto => None,
        }
    }

    /// Category label at `position`, empty between slots.
    pub fn category_at(&self, position: f64) -> String {
        let Some(names) = self.names() else {
            return String::new();
        };
        let slot = position.round();
        if (position - slot).abs() > 1e-6 || slot < 0.0 {
            return String::new();
        }
        names.get(slot as usize).cloned().unwrap_or_default()
    }

    /// Space reserved for tick labels across the axis, in backend units.
    fn label_room(&self, base: u32) -> u32 {
        let widest = self
            .names()
            .map(|names| names.iter().map(|n| n.chars().count()).max().unwrap_or(0))
            .unwrap_or(6);
        base.max((widest as f64 * TICK_FONT * 0.5) as u32 + 12)
    }
}

/// Build a chart over `x` and `y` inside `area` and draw its mesh.
///
/// Axis descriptions come from `labels`; the grid is drawn only when
/// `labels.grid` is set.
pub fn cartesian<'a, 'b>(
    area: &'a Root<'b>,
    x: &Axis,
    y: &Axis,
    labels: &AxisLabels,
) -> PlotResult<Chart<'a, 'b>> {
    let desc_room = |desc: &Option<String>| if desc.is_some() { LABEL_FONT as u32 + 8 } else { 0 };
    let x_area = TICK_FONT as u32 + 14 + desc_room(&labels.xlabel);
    let y_area = y.label_room(40) + desc_room(&labels.ylabel);

    let mut chart = ChartBuilder::on(area)
        .margin(CHART_MARGIN)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area)
        .build_cartesian_2d(x.range(), y.range())
        .or_render_error()?;

    let x_format = |v: &f64| x.category_at(*v);
    let y_format = |v: &f64| y.category_at(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.label_style((FONT_FAMILY, TICK_FONT))
            .axis_desc_style((FONT_FAMILY, LABEL_FONT));
        if let Some(names) = x.names() {
            mesh.x_labels(names.len()).x_label_formatter(&x_format);
        }
        if let Some(names) = y.names() {
            mesh.y_labels(names.len()).y_label_formatter(&y_format);
        }
        if let Some(xlabel) = &labels.xlabel {
            mesh.x_desc(xlabel.as_str());
        }
        if let Some(ylabel) = &labels.ylabel {
            mesh.y_desc(ylabel.as_str());
        }
        if labels.grid {
            mesh.light_line_style(TRANSPARENT)
                .bold_line_style(GRID_COLOR.mix(GRID_ALPHA));
        } else {
            mesh.disable_mesh();
        }
        mesh.draw().or_render_error()?;
    }

    Ok(chart)
}
