//! Core trait definitions for the domain models
//!
//! These traits connect the typed models with the untyped [`Record`] rows that the table
//! readers and writers exchange.

use crate::models::table::{Record, Table};

/// A model that belongs to a single patient
pub trait EntityModel: Clone + std::fmt::Debug {
    /// Identifier of the patient this entity belongs to
    fn patient_id(&self) -> &str;
}

/// A model that can be converted to and from a table row
pub trait TableRow: Sized {
    /// Build the model from a row whose columns have already been validated
    fn from_record(record: &Record) -> Self;

    /// Convert the model back to a row
    fn to_record(&self) -> Record;
}

/// Build a table from typed rows
pub fn rows_to_table<T: TableRow>(name: &str, columns: Vec<String>, rows: &[T]) -> Table {
    Table::with_rows(name, columns, rows.iter().map(TableRow::to_record).collect())
}

/// Parse every row of a table into a typed model
#[must_use]
pub fn table_to_rows<T: TableRow>(table: &Table) -> Vec<T> {
    table.rows().iter().map(T::from_record).collect()
}
