//! Conversions between Arrow record batches and string tables
//!
//! Every column is handled as text: non-string columns are cast to `Utf8` on read and nulls
//! become empty strings. Tables are written back as nullable `Utf8` columns.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::error::Result;
use crate::models::{Record, Table};

/// Schema with one nullable `Utf8` field per column name
#[must_use]
pub fn utf8_schema<S: AsRef<str>>(columns: &[S]) -> SchemaRef {
    let fields: Vec<Field> = columns
        .iter()
        .map(|name| Field::new(name.as_ref(), DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Same field names as `schema`, every field a nullable `Utf8`
#[must_use]
pub fn as_utf8_schema(schema: &Schema) -> SchemaRef {
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    utf8_schema(&names)
}

/// Values of a column as strings, nulls as empty strings
///
/// # Errors
/// Returns an error if the column type cannot be cast to `Utf8`
pub fn column_as_strings(array: &ArrayRef) -> Result<Vec<String>> {
    let utf8 = match array.data_type() {
        DataType::Utf8 => Arc::clone(array),
        _ => cast(array, &DataType::Utf8)?,
    };
    let strings = utf8.as_string::<i32>();

    Ok((0..strings.len())
        .map(|i| {
            if strings.is_null(i) {
                String::new()
            } else {
                strings.value(i).to_string()
            }
        })
        .collect())
}

/// Column names of a record batch in schema order
#[must_use]
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

/// Convert a record batch to rows
///
/// # Errors
/// Returns an error if a column cannot be converted to strings
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    let names = column_names(batch);
    let columns = batch
        .columns()
        .iter()
        .map(column_as_strings)
        .collect::<Result<Vec<_>>>()?;

    Ok((0..batch.num_rows())
        .map(|row| {
            names
                .iter()
                .zip(&columns)
                .map(|(name, values)| (name.as_str(), values[row].as_str()))
                .collect::<Record>()
        })
        .collect())
}

/// Build a table from record batches sharing one schema
///
/// `columns` is used when there are no batches, so that an empty file still reports its
/// header.
///
/// # Errors
/// Returns an error if a batch cannot be converted
pub fn batches_to_table(
    name: &str,
    columns: Vec<String>,
    batches: &[RecordBatch],
) -> Result<Table> {
    let mut table = Table::new(name, columns);
    for batch in batches {
        for record in batch_to_records(batch)? {
            table.push(record);
        }
    }
    Ok(table)
}

/// Convert a table to a single record batch of `Utf8` columns in table column order
///
/// # Errors
/// Returns an error if the batch cannot be assembled
pub fn table_to_batch(table: &Table) -> Result<RecordBatch> {
    let schema = utf8_schema(table.columns());
    let arrays: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|column| {
            let values = StringArray::from_iter_values(table.rows().iter().map(|r| r.get(column)));
            Arc::new(values) as ArrayRef
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(table.len()));
    Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
}
