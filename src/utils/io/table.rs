//! Table source and sink seams
//!
//! The pipeline reads and writes whole tables by location. [`FileTableStore`] maps locations
//! to CSV or Parquet files by extension; [`MemoryTableStore`] keeps everything in memory for
//! tests and embedders.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::config::{PipelineConfig, TableFormat};
use crate::error::util::create_file_with_parents;
use crate::error::{PipelineError, Result};
use crate::models::Table;
use crate::utils::io::csv::{read_csv, write_csv};
use crate::utils::io::parquet::{read_parquet, write_parquet};
use crate::utils::logging::{log_operation_start, log_warning};

/// Reads whole tables by location
pub trait TableSource {
    /// Read the table at `location`
    ///
    /// # Errors
    /// Returns [`PipelineError::MissingTable`] when nothing exists at the location
    fn read_table(&self, location: &Path) -> Result<Table>;
}

/// Writes whole tables by location, replacing what was there
pub trait TableSink {
    /// Write `table` to `location`, creating parent directories as needed
    fn write_table(&self, table: &Table, location: &Path) -> Result<()>;

    /// Write a plain text artifact to `location`
    fn write_text(&self, text: &str, location: &Path) -> Result<()>;
}

/// Name used for a table in logs and errors: the file stem of its location
#[must_use]
pub fn table_name(location: &Path) -> String {
    location
        .file_stem()
        .map_or_else(|| location.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// File-backed tables, format chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTableStore {
    batch_size: usize,
}

impl FileTableStore {
    /// Create a store reading `batch_size` rows at a time
    #[must_use]
    pub const fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Create a store from the pipeline configuration
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.effective_batch_size())
    }

    /// Rows per batch
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for FileTableStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BATCH_SIZE)
    }
}

impl TableSource for FileTableStore {
    fn read_table(&self, location: &Path) -> Result<Table> {
        let name = table_name(location);
        match TableFormat::from_path(location)? {
            TableFormat::Csv => read_csv(location, &name, self.batch_size),
            TableFormat::Parquet => read_parquet(location, &name, self.batch_size),
        }
    }
}

impl TableSink for FileTableStore {
    fn write_table(&self, table: &Table, location: &Path) -> Result<()> {
        match TableFormat::from_path(location)? {
            TableFormat::Csv => write_csv(table, location),
            TableFormat::Parquet => write_parquet(table, location),
        }
    }

    fn write_text(&self, text: &str, location: &Path) -> Result<()> {
        use std::io::Write;

        log_operation_start("Writing", location);
        let mut file = create_file_with_parents(location)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// In-memory tables keyed by location
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RefCell<FxHashMap<PathBuf, Table>>,
    texts: RefCell<FxHashMap<PathBuf, String>>,
}

impl MemoryTableStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table
    pub fn insert(&self, location: impl Into<PathBuf>, table: Table) {
        self.tables.borrow_mut().insert(location.into(), table);
    }

    /// Copy of the table at a location
    #[must_use]
    pub fn table(&self, location: &Path) -> Option<Table> {
        self.tables.borrow().get(location).cloned()
    }

    /// Copy of the text artifact at a location
    #[must_use]
    pub fn text(&self, location: &Path) -> Option<String> {
        self.texts.borrow().get(location).cloned()
    }

    /// Whether anything was stored at a location
    #[must_use]
    pub fn contains(&self, location: &Path) -> bool {
        self.tables.borrow().contains_key(location) || self.texts.borrow().contains_key(location)
    }

    /// Every location holding a table, sorted
    #[must_use]
    pub fn table_locations(&self) -> Vec<PathBuf> {
        self.tables.borrow().keys().cloned().sorted().collect_vec()
    }
}

impl TableSource for MemoryTableStore {
    fn read_table(&self, location: &Path) -> Result<Table> {
        self.table(location).ok_or_else(|| {
            log_warning("No table stored", Some(location));
            PipelineError::MissingTable {
                path: location.to_path_buf(),
            }
        })
    }
}

impl TableSink for MemoryTableStore {
    fn write_table(&self, table: &Table, location: &Path) -> Result<()> {
        let stored = Table::with_rows(
            table_name(location),
            table.columns().to_vec(),
            table.rows().to_vec(),
        );
        self.insert(location, stored);
        Ok(())
    }

    fn write_text(&self, text: &str, location: &Path) -> Result<()> {
        self.texts
            .borrow_mut()
            .insert(location.to_path_buf(), text.to_string());
        Ok(())
    }
}
