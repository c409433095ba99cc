//! CSV tables through the Arrow CSV reader and writer

use std::io::Seek;
use std::path::Path;
use std::time::Instant;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};

use crate::error::Result;
use crate::error::util::{create_file_with_parents, safe_open_file};
use crate::models::Table;
use crate::utils::arrow_utils::{as_utf8_schema, batches_to_table, table_to_batch};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a CSV file with a header row, every column as text
///
/// # Errors
/// Returns [`crate::error::PipelineError::MissingTable`] when the file does not exist, or an
/// Arrow error when it is not valid CSV
pub fn read_csv(path: &Path, name: &str, batch_size: usize) -> Result<Table> {
    let start = Instant::now();
    log_operation_start("Reading CSV table", path);
    let mut file = safe_open_file(path, name)?;

    // Only the header is needed; values are read back as text regardless of inferred types
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(1))?;
    file.rewind()?;

    let schema = as_utf8_schema(&inferred);
    let columns: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_truncated_rows(true)
        .with_batch_size(batch_size)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let table = batches_to_table(name, columns, &batches)?;
    log_operation_complete("read", path, table.len(), Some(start.elapsed()));
    Ok(table)
}

/// Write a table as CSV with a header row, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be created or written
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing CSV table", path);

    let batch = table_to_batch(table)?;
    let file = create_file_with_parents(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;

    log_operation_complete("wrote", path, table.len(), Some(start.elapsed()));
    Ok(())
}
