//! Typed, name-addressed tabular frame built from a CSV buffer.

use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CsvError, CsvResult};

/// Cell spellings treated as missing values.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Storage for a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Every present cell parsed as a float; missing cells are `NaN`.
    Numeric(Vec<f64>),
    /// At least one present cell was not a number; missing cells are `None`.
    Text(Vec<Option<String>>),
}

/// A named column in a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Numeric values in row order, `NaN` where missing.
    pub fn as_numeric(&self) -> CsvResult<&[f64]> {
        match &self.data {
            ColumnData::Numeric(values) => Ok(values.as_slice()),
            ColumnData::Text(_) => Err(CsvError::NotNumeric(self.name.clone())),
        }
    }

    /// Numeric values in row order with missing values dropped.
    pub fn dropna(&self) -> CsvResult<Vec<f64>> {
        Ok(self
            .as_numeric()?
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Grouping key for a row, `None` when the cell is missing.
    pub fn key_at(&self, row: usize) -> Option<GroupKey> {
        match &self.data {
            ColumnData::Numeric(values) => values
                .get(row)
                .copied()
                .filter(|v| !v.is_nan())
                .map(GroupKey::Number),
            ColumnData::Text(values) => values
                .get(row)
                .and_then(|v| v.clone())
                .map(GroupKey::Text),
        }
    }

    /// Distinct present values.
    ///
    /// Numeric columns are sorted ascending; text columns keep the order of
    /// first appearance.
    pub fn categories(&self) -> Vec<GroupKey> {
        let mut seen: IndexSet<GroupKey> = IndexSet::new();
        for row in 0..self.len() {
            if let Some(key) = self.key_at(row) {
                seen.insert(key);
            }
        }
        let mut keys: Vec<GroupKey> = seen.into_iter().collect();
        if self.is_numeric() {
            keys.sort();
        }
        keys
    }
}

/// A grouping key taken from a single cell.
#[derive(Debug, Clone)]
pub enum GroupKey {
    Number(f64),
    Text(String),
}

impl GroupKey {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            GroupKey::Number(v) => Some(*v),
            GroupKey::Text(_) => None,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl std::hash::Hash for GroupKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            GroupKey::Number(v) => {
                0u8.hash(state);
                // -0.0 and 0.0 compare equal under total_cmp only after normalising
                let normalised = if *v == 0.0 { 0.0f64 } else { *v };
                normalised.to_bits().hash(state);
            }
            GroupKey::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Number(a), GroupKey::Number(b)) => {
                let a = if *a == 0.0 { 0.0 } else { *a };
                let b = if *b == 0.0 { 0.0 } else { *b };
                a.total_cmp(&b)
            }
            (GroupKey::Text(a), GroupKey::Text(b)) => a.cmp(b),
            (GroupKey::Number(_), GroupKey::Text(_)) => Ordering::Less,
            (GroupKey::Text(_), GroupKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(v) => write!(f, "{}", format_number(*v)),
            GroupKey::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Format a float without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// In-memory table parsed from CSV text.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl Frame {
    /// Parse a comma-separated buffer with a header row.
    pub fn from_csv_bytes(bytes: &[u8]) -> CsvResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
            return Err(CsvError::Empty);
        }
        let names = disambiguate_headers(headers.iter());
        let width = names.len();

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > width {
                // header is line 1, first record is line 2
                return Err(CsvError::Parse(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line + 2,
                    record.len()
                )));
            }
            for (col, slot) in cells.iter_mut().enumerate() {
                slot.push(record.get(col).and_then(normalise_cell));
            }
        }

        let rows = cells.first().map(Vec::len).unwrap_or(0);
        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| {
                let column = Column::new(name.clone(), infer_column(raw));
                (name, column)
            })
            .collect();

        let frame = Self { columns, rows };
        tracing::debug!(
            rows = frame.rows,
            columns = frame.columns.len(),
            numeric = frame.numeric_columns().len(),
            "Parsed CSV frame"
        );
        Ok(frame)
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> CsvResult<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| CsvError::ColumnNotFound(name.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Numeric columns in file order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.values().filter(|c| c.is_numeric()).collect()
    }
}

/// Trim a raw cell and map missing-value spellings to `None`.
fn normalise_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Rename repeated headers to `name.1`, `name.2`, ...
fn disambiguate_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut names = Vec::new();
    for header in headers {
        let base = header.trim().to_string();
        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

fn infer_column(raw: Vec<Option<String>>) -> ColumnData {
    let parsed: Option<Vec<f64>> = raw
        .iter()
        .map(|cell| match cell {
            None => Some(f64::NAN),
            Some(text) => text.parse::<f64>().ok(),
        })
        .collect();

    match parsed {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(raw),
    }
}
