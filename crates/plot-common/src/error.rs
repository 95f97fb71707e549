//! Error types for the plotting pipeline.

use csv_parser::CsvError;
use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Prefix every failure carries in the HTTP `detail` field.
pub const DETAIL_PREFIX: &str = "Error creating plot";

/// Primary error type for plot creation.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Input Errors ===
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("{0}")]
    MissingColumn(String),

    #[error("Format '{0}' is not supported (supported formats: png, jpg, svg, pdf)")]
    UnsupportedFormat(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("No data to plot: {0}")]
    EmptyData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Encoding failed: {0}")]
    EncodeError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl PlotError {
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        PlotError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PlotError::Csv(CsvError::ColumnNotFound(_)) => "unknown_column",
            PlotError::Csv(CsvError::NotNumeric(_)) => "not_numeric",
            PlotError::Csv(_) => "malformed_input",
            PlotError::MissingColumn(_) => "missing_column",
            PlotError::UnsupportedFormat(_) => "unsupported_format",
            PlotError::InvalidParameter { .. } => "invalid_parameter",
            PlotError::EmptyData(_) => "empty_data",
            PlotError::InvalidData(_) => "invalid_data",
            PlotError::RenderError(_) => "render_failure",
            PlotError::EncodeError(_) => "encode_failure",
            PlotError::InternalError(_) => "internal",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Every kind maps to 500; clients see one failure class.
    pub fn http_status_code(&self) -> u16 {
        500
    }

    /// Message placed in the response `detail` field.
    pub fn detail(&self) -> String {
        format!("{}: {}", DETAIL_PREFIX, self)
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::InternalError(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        PlotError::EncodeError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wraps_column_lookup() {
        let err = PlotError::from(CsvError::ColumnNotFound("price".to_string()));
        assert_eq!(err.detail(), "Error creating plot: 'price'");
        assert_eq!(err.kind(), "unknown_column");
    }

    #[test]
    fn test_all_kinds_are_500() {
        let errors = [
            PlotError::UnsupportedFormat("bmp".to_string()),
            PlotError::invalid_parameter("dpi", "must be positive"),
            PlotError::RenderError("boom".to_string()),
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 500);
            assert!(err.detail().starts_with(DETAIL_PREFIX));
        }
    }
}
