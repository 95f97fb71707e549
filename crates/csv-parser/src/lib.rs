//! CSV ingestion for the plotting service.
//!
//! Parses an uploaded comma-separated buffer into a [`Frame`] of named,
//! typed columns and provides the tabular operations the chart renderers
//! need:
//! - column lookup by exact name
//! - group-by with mean/sum aggregation
//! - per-category sample splitting
//! - pairwise Pearson correlation over numeric columns

pub mod aggregate;
pub mod correlation;
pub mod error;
pub mod frame;

pub use aggregate::Aggregation;
pub use correlation::{pearson, CorrelationMatrix};
pub use error::{CsvError, CsvResult};
pub use frame::{format_number, Column, ColumnData, Frame, GroupKey};
