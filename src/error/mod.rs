//! Error handling for the lipid cohort pipeline.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid or incomplete configuration (raised before any table is read)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required source table does not exist
    #[error("Missing source table: {}", path.display())]
    MissingTable {
        /// Location that was looked up
        path: PathBuf,
    },

    /// A column referenced by the pipeline is not present in a table
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn {
        /// Name of the missing column
        column: String,
        /// Name of the table that was checked
        table: String,
    },

    /// The table location has an extension no reader is registered for
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error processing Arrow data (CSV reading and writing included)
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            table: table.into(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
