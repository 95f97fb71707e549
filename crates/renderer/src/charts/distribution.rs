//! Distribution charts: histogram, box and violin.

use csv_parser::{Frame, GroupKey};
use plot_common::{AxisLabels, PlotError, PlotResult};
use plotters::prelude::*;

use super::finite_extent;
use crate::axes::{cartesian, Axis, Chart};
use crate::color::{category_color, CATEGORY_PALETTE, OUTLINE, SERIES_COLOR};
use crate::figure::{RenderResultExt, Root};
use crate::stats::{BoxStats, Histogram, Kde, HISTOGRAM_BINS};

pub const HISTOGRAM_ALPHA: f64 = 0.7;

/// Slot used by the single-series box and violin.
const SINGLE_POSITION: f64 = 0.0;

/// Box width for the single-series box plot, in slot units.
const SINGLE_BOX_WIDTH: f64 = 0.5;

/// Box and violin width for grouped plots, in slot units.
const GROUPED_WIDTH: f64 = 0.8;

/// Points at which the violin density is sampled.
const VIOLIN_POINTS: usize = 100;

/// Grouped violins extend this many bandwidths past the data.
const VIOLIN_CUT: f64 = 2.0;

const SINGLE_VIOLIN_ALPHA: f64 = 0.3;

const OUTLIER_RADIUS: u32 = 3;

fn sample(frame: &Frame, column: &str) -> PlotResult<Vec<f64>> {
    let values = frame.column(column)?.dropna()?;
    if values.is_empty() {
        return Err(PlotError::EmptyData(format!("column '{}' has no numeric values", column)));
    }
    Ok(values)
}

fn segment(chart: &Chart<'_, '_>, from: (f64, f64), to: (f64, f64), style: ShapeStyle) -> PlotResult<()> {
    chart
        .plotting_area()
        .draw(&PathElement::new(vec![from, to], style))
        .or_render_error()
}

/// 30 equal-width bins over x; y is ignored.
pub fn histogram(root: &Root<'_>, frame: &Frame, x_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let values = sample(frame, x_col)?;
    let hist = Histogram::compute(&values, HISTOGRAM_BINS)
        .ok_or_else(|| PlotError::EmptyData(format!("column '{}' has no finite values", x_col)))?;

    let lo = hist.edges[0];
    let hi = hist.edges[hist.edges.len() - 1];
    let x = Axis::linear(lo, hi);
    let y = Axis::from_zero(0.0, hist.max_count() as f64);
    let mut chart = cartesian(root, &x, &y, labels)?;

    let bins = || {
        hist.counts
            .iter()
            .enumerate()
            .map(|(i, count)| [(hist.edges[i], 0.0), (hist.edges[i + 1], *count as f64)])
    };
    chart
        .draw_series(bins().map(|corners| Rectangle::new(corners, SERIES_COLOR.mix(HISTOGRAM_ALPHA).filled())))
        .or_render_error()?;
    chart
        .draw_series(bins().map(|corners| Rectangle::new(corners, BLACK.mix(HISTOGRAM_ALPHA))))
        .or_render_error()?;
    Ok(())
}

/// One box over every value of x, labelled with the column name.
pub fn single_box(root: &Root<'_>, frame: &Frame, x_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let values = sample(frame, x_col)?;
    let stats = BoxStats::compute(&values)
        .ok_or_else(|| PlotError::EmptyData(format!("column '{}' has no finite values", x_col)))?;

    let (lo, hi) = stats.extent();
    let x = Axis::categories(vec![x_col.to_string()]);
    let chart = cartesian(root, &x, &Axis::linear(lo, hi), labels)?;

    let style = BoxStyle {
        fill: None,
        edge: BLACK,
        median: CATEGORY_PALETTE[1],
        width: SINGLE_BOX_WIDTH,
    };
    draw_box(&chart, SINGLE_POSITION, &stats, &style)
}

/// One box per distinct x value over the y values in that group.
pub fn grouped_box(
    root: &Root<'_>,
    frame: &Frame,
    x_col: &str,
    y_col: &str,
    labels: &AxisLabels,
) -> PlotResult<()> {
    let groups = frame.samples_by(x_col, y_col)?;
    let stats: Vec<Option<BoxStats>> = groups.iter().map(|(_, v)| BoxStats::compute(v)).collect();

    let (lo, hi) = finite_extent(stats.iter().flatten().flat_map(|s| {
        let (lo, hi) = s.extent();
        [lo, hi]
    }));
    let chart = cartesian(root, &group_axis(&groups), &Axis::linear(lo, hi), labels)?;

    for (slot, stats) in stats.iter().enumerate() {
        if let Some(stats) = stats {
            let style = BoxStyle {
                fill: Some(category_color(slot)),
                edge: OUTLINE,
                median: OUTLINE,
                width: GROUPED_WIDTH,
            };
            draw_box(&chart, slot as f64, stats, &style)?;
        }
    }
    Ok(())
}

/// Density of x mirrored around its slot, with extrema caps.
pub fn single_violin(root: &Root<'_>, frame: &Frame, x_col: &str, labels: &AxisLabels) -> PlotResult<()> {
    let values = sample(frame, x_col)?;
    let (lo, hi) = finite_extent(values.iter().copied());

    let x = Axis::categories(vec![x_col.to_string()]);
    let chart = cartesian(root, &x, &Axis::linear(lo, hi), labels)?;
    let half = SINGLE_BOX_WIDTH / 2.0;

    if let Some(kde) = Kde::new(&values) {
        let curve = kde.evaluate(lo, hi, VIOLIN_POINTS);
        let peak = curve.iter().map(|p| p.1).fold(0.0, f64::max);
        if peak > 0.0 {
            let body = SERIES_COLOR.mix(SINGLE_VIOLIN_ALPHA).filled();
            draw_violin_body(&chart, SINGLE_POSITION, &curve, half / peak, body)?;
        }
    }

    // extrema caps and the bar joining them
    let stroke = SERIES_COLOR.stroke_width(1);
    let cap = half / 2.0;
    for value in [lo, hi] {
        segment(
            &chart,
            (SINGLE_POSITION - cap, value),
            (SINGLE_POSITION + cap, value),
            stroke,
        )?;
    }
    segment(&chart, (SINGLE_POSITION, lo), (SINGLE_POSITION, hi), stroke)
}

/// One violin per distinct x value with an inner quartile box.
pub fn grouped_violin(
    root: &Root<'_>,
    frame: &Frame,
    x_col: &str,
    y_col: &str,
    labels: &AxisLabels,
) -> PlotResult<()> {
    let groups = frame.samples_by(x_col, y_col)?;

    let curves: Vec<Option<Vec<(f64, f64)>>> = groups
        .iter()
        .map(|(_, values)| {
            Kde::new(values).map(|kde| {
                let (lo, hi) = finite_extent(values.iter().copied());
                let reach = VIOLIN_CUT * kde.bandwidth();
                kde.evaluate(lo - reach, hi + reach, VIOLIN_POINTS)
            })
        })
        .collect();

    let support = curves.iter().flatten().flat_map(|c| c.iter().map(|p| p.0));
    let data = groups.iter().flat_map(|(_, v)| v.iter().copied());
    let (lo, hi) = finite_extent(support.chain(data));
    let chart = cartesian(root, &group_axis(&groups), &Axis::linear(lo, hi), labels)?;

    // every density integrates to one, so a shared scale keeps areas equal
    let peak = curves
        .iter()
        .flatten()
        .flat_map(|c| c.iter().map(|p| p.1))
        .fold(0.0, f64::max);
    let half = GROUPED_WIDTH / 2.0;

    for (slot, ((_, values), curve)) in groups.iter().zip(&curves).enumerate() {
        let center = slot as f64;
        match curve {
            Some(curve) if peak > 0.0 => {
                let body = category_color(slot).filled();
                draw_violin_body(&chart, center, curve, half / peak, body)?;
                draw_violin_outline(&chart, center, curve, half / peak)?;
            }
            _ => {
                // a single distinct value has no spread to estimate
                if let Some(&value) = values.first() {
                    segment(
                        &chart,
                        (center - half, value),
                        (center + half, value),
                        OUTLINE.stroke_width(1),
                    )?;
                }
                continue;
            }
        }

        if let Some(stats) = BoxStats::compute(values) {
            segment(
                &chart,
                (center, stats.whisker_low),
                (center, stats.whisker_high),
                OUTLINE.stroke_width(2),
            )?;
            segment(&chart, (center, stats.q1), (center, stats.q3), OUTLINE.stroke_width(5))?;
            chart
                .plotting_area()
                .draw(&Circle::new((center, stats.median), 2, WHITE.filled()))
                .or_render_error()?;
        }
    }
    Ok(())
}

/// Category axis for grouped boxes and violins, one slot per group.
fn group_axis(groups: &[(GroupKey, Vec<f64>)]) -> Axis {
    Axis::categories(groups.iter().map(|(key, _)| key.to_string()).collect())
}

struct BoxStyle {
    fill: Option<RGBColor>,
    edge: RGBColor,
    median: RGBColor,
    width: f64,
}

fn draw_box(chart: &Chart<'_, '_>, center: f64, stats: &BoxStats, style: &BoxStyle) -> PlotResult<()> {
    let half = style.width / 2.0;
    let edge = style.edge.stroke_width(1);
    let area = chart.plotting_area();
    let corners = [(center - half, stats.q1), (center + half, stats.q3)];

    if let Some(fill) = style.fill {
        area.draw(&Rectangle::new(corners, fill.filled())).or_render_error()?;
    }
    area.draw(&Rectangle::new(corners, edge)).or_render_error()?;

    // whiskers and caps
    let cap = half / 2.0;
    for (from, to) in [(stats.q1, stats.whisker_low), (stats.q3, stats.whisker_high)] {
        segment(chart, (center, from), (center, to), edge)?;
        segment(chart, (center - cap, to), (center + cap, to), edge)?;
    }

    segment(
        chart,
        (center - half, stats.median),
        (center + half, stats.median),
        style.median.stroke_width(2),
    )?;

    for value in &stats.outliers {
        area.draw(&Circle::new((center, *value), OUTLIER_RADIUS, edge))
            .or_render_error()?;
    }
    Ok(())
}

/// Mirrored density around `center`; `scale` maps density to half-width in
/// slot units.
fn mirrored(center: f64, curve: &[(f64, f64)], scale: f64) -> Vec<(f64, f64)> {
    let right = curve.iter().map(|&(y, d)| (center + d * scale, y));
    let left = curve.iter().rev().map(|&(y, d)| (center - d * scale, y));
    right.chain(left).collect()
}

fn draw_violin_body(
    chart: &Chart<'_, '_>,
    center: f64,
    curve: &[(f64, f64)],
    scale: f64,
    style: ShapeStyle,
) -> PlotResult<()> {
    chart
        .plotting_area()
        .draw(&Polygon::new(mirrored(center, curve, scale), style))
        .or_render_error()
}

fn draw_violin_outline(chart: &Chart<'_, '_>, center: f64, curve: &[(f64, f64)], scale: f64) -> PlotResult<()> {
    let mut outline = mirrored(center, curve, scale);
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    chart
        .plotting_area()
        .draw(&PathElement::new(outline, OUTLINE.stroke_width(1)))
        .or_render_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;
    use plot_common::FigureSize;
    use test_utils::{count_svg_elements, svg_texts};

    fn labels() -> AxisLabels {
        AxisLabels {
            xlabel: Some("g".into()),
            ylabel: None,
            title: String::new(),
            grid: false,
        }
    }

    fn render<F>(csv: &str, draw: F) -> PlotResult<String>
    where
        F: FnOnce(&Root<'_>, &Frame) -> PlotResult<()>,
    {
        let frame = Frame::from_csv_bytes(csv.as_bytes()).unwrap();
        let figure = Figure::draw(FigureSize::new(5.0, 4.0).unwrap(), "", |root| draw(root, &frame))?;
        Ok(figure.into_document().markup)
    }

    #[test]
    fn test_histogram_draws_thirty_bins() {
        let markup = render("v\n1\n2\n2\n3\n\n9\n", |root, frame| {
            histogram(root, frame, "v", &labels())
        })
        .unwrap();
        assert_eq!(
            count_svg_elements(&markup, "rect", "fill=\"#1F77B4\""),
            HISTOGRAM_BINS
        );
    }

    #[test]
    fn test_histogram_of_missing_values_is_empty_data() {
        let err = render("v,w\n,1\nNA,2\n", |root, frame| histogram(root, frame, "v", &labels())).unwrap_err();
        assert!(matches!(err, PlotError::EmptyData(_)));
    }

    #[test]
    fn test_single_box_tick_is_column_name() {
        let markup = render("v\n1\n2\n3\n4\n50\n", |root, frame| {
            single_box(root, frame, "v", &labels())
        })
        .unwrap();
        assert_eq!(svg_texts(&markup).iter().filter(|t| *t == "v").count(), 1);
        // 50 sits past the upper fence
        assert_eq!(count_svg_elements(&markup, "circle", "stroke=\"#000000\""), 1);
    }

    #[test]
    fn test_grouped_box_one_per_category() {
        let csv = "g,v\nb,1\nb,2\na,3\na,4\nc,\n";
        let frame = Frame::from_csv_bytes(csv.as_bytes()).unwrap();
        let groups = frame.samples_by("g", "v").unwrap();
        assert_eq!(group_axis(&groups).names(), Some(&["b".to_string(), "a".to_string(), "c".to_string()][..]));

        let markup = render(csv, |root, frame| grouped_box(root, frame, "g", "v", &labels())).unwrap();
        assert_eq!(count_svg_elements(&markup, "rect", "fill=\"#1F77B4\""), 1);
        assert_eq!(count_svg_elements(&markup, "rect", "fill=\"#FF7F0E\""), 1);
    }

    #[test]
    fn test_single_violin_constant_column() {
        let markup = render("v\n2\n2\n2\n", |root, frame| single_violin(root, frame, "v", &labels())).unwrap();
        assert_eq!(count_svg_elements(&markup, "polygon", ""), 0);
    }

    #[test]
    fn test_grouped_violin_flat_group() {
        let markup = render("g,v\n1,5\n1,5\n2,1\n2,3\n2,4\n", |root, frame| {
            grouped_violin(root, frame, "g", "v", &labels())
        })
        .unwrap();
        assert_eq!(count_svg_elements(&markup, "polygon", ""), 1);
    }
}
