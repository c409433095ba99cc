//! Parquet tables through the Arrow Parquet reader and writer

use std::path::Path;
use std::time::Instant;

use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::error::util::{create_file_with_parents, safe_open_file};
use crate::models::Table;
use crate::utils::arrow_utils::{batches_to_table, table_to_batch};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a Parquet file, every column as text
///
/// # Errors
/// Returns [`crate::error::PipelineError::MissingTable`] when the file does not exist, or a
/// Parquet error when it cannot be decoded
pub fn read_parquet(path: &Path, name: &str, batch_size: usize) -> Result<Table> {
    let start = Instant::now();
    log_operation_start("Reading parquet table", path);
    let file = safe_open_file(path, name)?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let table = batches_to_table(name, columns, &batches)?;
    log_operation_complete("read", path, table.len(), Some(start.elapsed()));
    Ok(table)
}

/// Write a table as Parquet, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be created or encoded
pub fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing parquet table", path);

    let batch = table_to_batch(table)?;
    let file = create_file_with_parents(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, table.len(), Some(start.elapsed()));
    Ok(())
}
