//! Tests for chart dispatch, labelling and per-type behaviour.

use csv_parser::Frame;
use plot_common::{PlotError, PlotParams, PlotRequest, PlotType};
use renderer::render_figure;
use test_utils::{count_svg_elements, fixtures, svg_texts};

fn frame(csv: &str) -> Frame {
    Frame::from_csv_bytes(csv.as_bytes()).unwrap()
}

fn params(plot_type: &str, x: &str, y: Option<&str>) -> PlotParams {
    PlotRequest {
        x_col: x.to_string(),
        y_col: y.map(str::to_string),
        plot_type: plot_type.to_string(),
        output_format: "svg".to_string(),
        ..PlotRequest::default()
    }
    .validate()
    .unwrap()
}

fn markup(csv: &str, params: &PlotParams) -> String {
    render_figure(&frame(csv), params)
        .unwrap()
        .into_document()
        .markup
}

fn texts(csv: &str, params: &PlotParams) -> Vec<String> {
    svg_texts(&markup(csv, params))
}

fn has(texts: &[String], text: &str) -> bool {
    texts.iter().any(|t| t == text)
}

/// `attr` of every `<rect>` filled with the series colour.
fn bar_attr(svg: &str, attr: &str) -> Vec<String> {
    let needle = format!(" {}=\"", attr);
    svg.split("<rect")
        .skip(1)
        .filter(|rect| rect.split('>').next().unwrap_or("").contains("fill=\"#1F77B4\""))
        .map(|rect| rect.split(&needle).nth(1).unwrap().split('"').next().unwrap().to_string())
        .collect()
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_every_type_renders_two_numeric_columns() {
    for plot_type in PlotType::ALL {
        let params = params(plot_type.as_str(), "x", Some("y"));
        let result = render_figure(&frame(fixtures::TWO_NUMERIC), &params);
        assert!(result.is_ok(), "{} failed: {:?}", plot_type, result.err());
    }
}

#[test]
fn test_unknown_type_matches_line() {
    let line = markup(fixtures::TWO_NUMERIC, &params("line", "x", Some("y")));
    let unknown = markup(fixtures::TWO_NUMERIC, &params("sparkline", "x", Some("y")));
    assert_eq!(line, unknown);
}

#[test]
fn test_unknown_type_without_y_plots_x_against_itself() {
    let svg = markup(fixtures::TWO_NUMERIC, &params("sparkline", "x", None));
    assert_eq!(count_svg_elements(&svg, "polyline", "#1F77B4"), 1);
    assert!(has(&svg_texts(&svg), "x"));
}

#[test]
fn test_line_without_y_is_missing_column() {
    let err = render_figure(&frame(fixtures::TWO_NUMERIC), &params("line", "x", None)).unwrap_err();
    assert!(matches!(err, PlotError::MissingColumn(_)));
}

#[test]
fn test_unknown_column_is_reported_by_name() {
    let err = render_figure(&frame(fixtures::TWO_NUMERIC), &params("scatter", "x", Some("nope")))
        .unwrap_err();
    assert!(err.detail().contains("'nope'"));
    assert_eq!(err.kind(), "unknown_column");
}

// ============================================================================
// Labels and titles
// ============================================================================

#[test]
fn test_default_title_and_axis_labels() {
    let texts = texts(fixtures::TWO_NUMERIC, &params("scatter", "x", Some("y")));
    assert!(has(&texts, "y vs x"));
    assert!(has(&texts, "x"));
    assert!(has(&texts, "y"));
}

#[test]
fn test_histogram_ignores_y() {
    let with_y = texts(fixtures::TWO_NUMERIC, &params("histogram", "x", Some("y")));
    assert!(has(&with_y, "Distribution of x"));
    assert!(!has(&with_y, "y"));
}

#[test]
fn test_heatmap_and_pie_skip_axis_labels() {
    let mut p = params("heatmap", "x", Some("y"));
    p.labels.xlabel = Some("XLABEL".to_string());
    p.labels.ylabel = Some("YLABEL".to_string());
    let svg = markup(fixtures::MIXED_TABLE, &p);
    assert!(has(&svg_texts(&svg), "Correlation Heatmap"));
    assert!(!svg.contains("XLABEL"));
    assert!(!svg.contains("YLABEL"));

    let mut p = params("pie", "fruit", Some("count"));
    p.labels.xlabel = Some("XLABEL".to_string());
    p.labels.title = Some("Fruit".to_string());
    let svg = markup(fixtures::PIE_SLICES, &p);
    assert!(has(&svg_texts(&svg), "Fruit"));
    assert!(!svg.contains("XLABEL"));
    // no grid on pies
    assert!(!svg.contains("opacity=\"0.3\""));
}

#[test]
fn test_single_box_and_violin_label_the_column() {
    for kind in ["box", "violin"] {
        let texts = texts(fixtures::TWO_NUMERIC, &params(kind, "x", None));
        assert!(has(&texts, "x"), "{} tick label", kind);
        assert!(!has(&texts, "y"), "{} y label", kind);
    }
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_bar_means_duplicate_groups() {
    let svg = markup(fixtures::DUPLICATE_GROUPS, &params("bar", "x", Some("y")));
    let texts = svg_texts(&svg);
    assert!(has(&texts, "A") && has(&texts, "B"));
    // both means are 2.0, so the bars share a top edge
    let tops = bar_attr(&svg, "y");
    assert_eq!(tops.len(), 2);
    assert_eq!(tops[0], tops[1]);
}

#[test]
fn test_bar_numeric_keys_keep_their_spacing() {
    let svg = markup("year,v\n2000,1\n2001,1\n2020,1\n", &params("bar", "year", Some("v")));
    let lefts: Vec<i64> = bar_attr(&svg, "x").iter().map(|x| x.parse().unwrap()).collect();
    assert_eq!(lefts.len(), 3);
    // 2001 sits next to 2000, 2020 is far off to the right
    let near = lefts[1] - lefts[0];
    let far = lefts[2] - lefts[1];
    assert!(far > 10 * near, "{:?}", lefts);
}

#[test]
fn test_pie_sums_duplicate_labels() {
    let texts = texts(fixtures::PIE_SLICES, &params("pie", "fruit", Some("count")));
    // apple 4, banana 2, cherry 4 of 10
    assert_eq!(texts.iter().filter(|t| *t == "40.0%").count(), 2);
    assert!(has(&texts, "20.0%"));
}

#[test]
fn test_grouped_box_over_categories() {
    let texts = texts(fixtures::GROUPED_SAMPLES, &params("box", "species", Some("length")));
    let at = |name: &str| texts.iter().position(|t| t == name).unwrap();
    assert!(at("setosa") < at("versicolor"));
    assert!(at("versicolor") < at("virginica"));
}

#[test]
fn test_gaps_do_not_fail_series() {
    for kind in ["line", "scatter", "area"] {
        let result = render_figure(&frame(fixtures::WITH_GAPS), &params(kind, "x", Some("y")));
        assert!(result.is_ok(), "{}", kind);
    }
}
