//! Lipid cohort extraction and 10-year ASCVD risk estimation.
//!
//! Patient demographics and free-text consult notes are consolidated into one record of lab
//! values per diabetic or hypertensive patient, and each record is scored with the Pooled
//! Cohort Equations.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{PipelineConfig, StudyContext, TableFormat};
pub use error::{PipelineError, Result};
pub use models::{ConsolidatedRecord, Consult, Patient, Record, Table};
pub use pipeline::{ExtractionOutput, ExtractionStage, RiskOutput, RiskStage, run_pipeline};
pub use utils::io::{FileTableStore, MemoryTableStore, TableSink, TableSource};

// Algorithms
pub use algorithm::{
    ExtractedValue, ExtractionStats, PatientFilter, RiskError, RiskStats, ScoredRecord,
    merge_latest_per_patient,
};
