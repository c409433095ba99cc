//! Algorithms of the lipid cohort pipeline
//!
//! Leaf first: note extraction, cohort selection, consult enrichment, temporal merge,
//! gap reporting and risk estimation.

pub mod cohort;
pub mod enrichment;
pub mod extraction;
pub mod gaps;
pub mod merge;
pub mod risk;
pub mod statistics;

// Re-export commonly used items
pub use cohort::{FilterCriteria, PatientFilter, cohort_ids, filter_cohort, select_cohort};
pub use enrichment::{EnrichedConsults, enrich_consult, enrich_consults, join_with_patients};
pub use extraction::{ExtractedValue, extract_hdl, extract_total_cholesterol};
pub use gaps::{find_gap_patients, gap_summary_line};
pub use merge::{Recency, compare_recency, merge_latest_per_patient, merge_pair};
pub use risk::{RiskError, RiskSettings, RiskStats, ScoredRecord, score_record, score_records};
pub use statistics::ExtractionStats;
