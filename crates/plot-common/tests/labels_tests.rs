//! Tests for the labeling and title policy.

use plot_common::{AxisLabels, LabelOverrides, PlotType, HEATMAP_TITLE};

fn overrides(x: &str, y: &str, title: &str) -> LabelOverrides {
    let opt = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
    LabelOverrides {
        xlabel: opt(x),
        ylabel: opt(y),
        title: opt(title),
    }
}

// ============================================================================
// Axis labels
// ============================================================================

#[test]
fn test_column_names_are_default_labels() {
    let labels = AxisLabels::resolve(PlotType::Line, "year", Some("sales"), &LabelOverrides::default());
    assert_eq!(labels.xlabel.as_deref(), Some("year"));
    assert_eq!(labels.ylabel.as_deref(), Some("sales"));
    assert!(labels.grid);
}

#[test]
fn test_explicit_labels_win() {
    let labels = AxisLabels::resolve(
        PlotType::Scatter,
        "year",
        Some("sales"),
        &overrides("Year", "Sales ($)", ""),
    );
    assert_eq!(labels.xlabel.as_deref(), Some("Year"));
    assert_eq!(labels.ylabel.as_deref(), Some("Sales ($)"));
}

#[test]
fn test_histogram_never_labels_y() {
    let labels = AxisLabels::resolve(
        PlotType::Histogram,
        "age",
        Some("weight"),
        &overrides("", "Weight", ""),
    );
    assert_eq!(labels.xlabel.as_deref(), Some("age"));
    assert_eq!(labels.ylabel, None);
    assert_eq!(labels.title, "Distribution of age");
}

#[test]
fn test_no_y_means_no_ylabel() {
    let labels = AxisLabels::resolve(PlotType::Box, "age", None, &overrides("", "ignored", ""));
    assert_eq!(labels.ylabel, None);
    assert_eq!(labels.title, "age");
}

#[test]
fn test_heatmap_and_pie_have_no_axes() {
    for plot_type in [PlotType::Heatmap, PlotType::Pie] {
        let labels = AxisLabels::resolve(plot_type, "a", Some("b"), &overrides("X", "Y", ""));
        assert_eq!(labels.xlabel, None);
        assert_eq!(labels.ylabel, None);
        assert!(!labels.grid);
    }
}

// ============================================================================
// Titles
// ============================================================================

#[test]
fn test_title_defaults() {
    let none = LabelOverrides::default();
    assert_eq!(AxisLabels::resolve(PlotType::Heatmap, "a", Some("b"), &none).title, HEATMAP_TITLE);
    assert_eq!(AxisLabels::resolve(PlotType::Pie, "fruit", Some("count"), &none).title, "count vs fruit");
    assert_eq!(AxisLabels::resolve(PlotType::Bar, "x", Some("y"), &none).title, "y vs x");
    assert_eq!(AxisLabels::resolve(PlotType::Violin, "x", None, &none).title, "x");
}

#[test]
fn test_explicit_title_beats_type_default() {
    let custom = overrides("", "", "My Chart");
    for plot_type in PlotType::ALL {
        assert_eq!(AxisLabels::resolve(plot_type, "x", Some("y"), &custom).title, "My Chart");
    }
}
