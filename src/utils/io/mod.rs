//! Table input and output
//!
//! Tables are read and written whole, through the [`TableSource`] and [`TableSink`] seams.

pub mod csv;
pub mod parquet;
pub mod table;

pub use table::{FileTableStore, MemoryTableStore, TableSink, TableSource, table_name};
