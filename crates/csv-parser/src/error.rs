//! Error types for CSV ingestion and frame operations.

use thiserror::Error;

/// Result type for CSV parser operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Error types for CSV parsing and column access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CsvError {
    /// Malformed delimited text
    #[error("Error tokenizing data. {0}")]
    Parse(String),

    /// Buffer is not valid UTF-8
    #[error("Invalid encoding: {0}")]
    Encoding(String),

    /// Buffer holds no header row
    #[error("No columns to parse from file")]
    Empty,

    /// Referenced column is absent; message mirrors a key lookup failure
    #[error("'{0}'")]
    ColumnNotFound(String),

    /// Column used where numeric data is required
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Utf8 { .. } => CsvError::Encoding(err.to_string()),
            _ => CsvError::Parse(err.to_string()),
        }
    }
}
