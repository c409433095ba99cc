//! In-memory tabular records
//!
//! Every source and output table is handled as an ordered list of column names plus rows
//! mapping column name to string value, which is the shape the table readers and writers
//! exchange with the pipeline.

use rustc_hash::FxHashMap;

use crate::error::{PipelineError, Result};

/// One table row: column name to string value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(FxHashMap<String, String>);

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a column, or the empty string when the column is absent
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map_or("", String::as_str)
    }

    /// Set the value of a column, replacing any previous value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Whether the record has a value (possibly empty) for the column
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Number of columns present in the record
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(column, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Record {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A named table: ordered column names and its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from existing rows
    pub fn with_rows(name: impl Into<String>, columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Table name used in log messages and errors
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in table order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in table order
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Consume the table, returning its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Append a row
    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table declares the column
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Check that every required column is declared by the table
    ///
    /// # Errors
    /// Returns [`PipelineError::MissingColumn`] naming the first absent column
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(PipelineError::missing_column(*column, &self.name)),
            None => Ok(()),
        }
    }
}
