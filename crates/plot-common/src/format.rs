//! Output formats and their content types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlotError, PlotResult};

/// Encoded artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Png,
        OutputFormat::Jpg,
        OutputFormat::Svg,
        OutputFormat::Pdf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// Parse an exact format tag; anything else is `UnsupportedFormat`.
    pub fn from_tag(tag: &str) -> PlotResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == tag)
            .ok_or_else(|| PlotError::UnsupportedFormat(tag.to_string()))
    }

    /// MIME type sent in the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpg => "image/jpeg",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(OutputFormat::from_tag("png").unwrap().content_type(), "image/png");
        assert_eq!(OutputFormat::from_tag("jpg").unwrap().content_type(), "image/jpeg");
        assert_eq!(OutputFormat::from_tag("svg").unwrap().content_type(), "image/svg+xml");
        assert_eq!(OutputFormat::from_tag("pdf").unwrap().content_type(), "application/pdf");
    }

    #[test]
    fn test_unsupported_formats() {
        for tag in ["bmp", "jpeg", "PNG", ""] {
            let err = OutputFormat::from_tag(tag).unwrap_err();
            assert!(matches!(err, PlotError::UnsupportedFormat(_)));
        }
    }
}
