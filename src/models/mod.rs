//! Domain models for the lipid cohort pipeline
//!
//! Source rows (patients, consults), the consolidated per-patient record and the generic
//! table representation they are read from and written to.

pub mod consolidated;
pub mod consult;
pub mod patient;
pub mod table;
pub mod traits;

// Re-export commonly used types
pub use consolidated::ConsolidatedRecord;
pub use consult::Consult;
pub use patient::Patient;
pub use table::{Record, Table};
pub use traits::{EntityModel, TableRow, rows_to_table, table_to_rows};
