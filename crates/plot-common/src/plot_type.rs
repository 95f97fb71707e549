//! Chart kinds the service can render.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine fixed chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    Line,
    Scatter,
    Bar,
    Histogram,
    Box,
    Violin,
    Heatmap,
    Area,
    Pie,
}

impl PlotType {
    /// All plot types in advertised order.
    pub const ALL: [PlotType; 9] = [
        PlotType::Line,
        PlotType::Scatter,
        PlotType::Bar,
        PlotType::Histogram,
        PlotType::Box,
        PlotType::Violin,
        PlotType::Heatmap,
        PlotType::Area,
        PlotType::Pie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::Line => "line",
            PlotType::Scatter => "scatter",
            PlotType::Bar => "bar",
            PlotType::Histogram => "histogram",
            PlotType::Box => "box",
            PlotType::Violin => "violin",
            PlotType::Heatmap => "heatmap",
            PlotType::Area => "area",
            PlotType::Pie => "pie",
        }
    }

    /// Exact, case-sensitive tag lookup.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Whether the chart is drawn on cartesian axes with labels and grid.
    ///
    /// Heatmap and pie manage their own decorations.
    pub fn uses_axes(&self) -> bool {
        !matches!(self, PlotType::Heatmap | PlotType::Pie)
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a client-supplied plot-type tag.
///
/// Unknown tags fall back to [`PlotType::Line`]; `recognized` records
/// whether that happened so the caller can log it and apply the fallback
/// branch's looser column rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSelection {
    pub plot_type: PlotType,
    pub recognized: bool,
}

impl PlotSelection {
    pub fn resolve(tag: &str) -> Self {
        match PlotType::from_tag(tag) {
            Some(plot_type) => Self {
                plot_type,
                recognized: true,
            },
            None => Self {
                plot_type: PlotType::Line,
                recognized: false,
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        !self.recognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for plot_type in PlotType::ALL {
            assert_eq!(PlotType::from_tag(plot_type.as_str()), Some(plot_type));
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(PlotType::from_tag("Line"), None);
        assert_eq!(PlotType::from_tag("BAR"), None);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_line() {
        let selection = PlotSelection::resolve("sparkline");
        assert_eq!(selection.plot_type, PlotType::Line);
        assert!(selection.is_fallback());

        let selection = PlotSelection::resolve("pie");
        assert_eq!(selection.plot_type, PlotType::Pie);
        assert!(!selection.is_fallback());
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&PlotType::ALL).unwrap();
        assert_eq!(
            json,
            r#"["line","scatter","bar","histogram","box","violin","heatmap","area","pie"]"#
        );
    }
}
