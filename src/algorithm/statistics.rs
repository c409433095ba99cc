//! Run statistics for the extraction stage
//!
//! These counts feed the human readable audit log; nothing downstream parses them.

use std::fmt;

use crate::algorithm::enrichment::EnrichedConsults;

/// Counts collected while running the extraction stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Patients in the patient table
    pub total_patients: usize,
    /// Patients with diabetes or hypertension
    pub cohort_patients: usize,
    /// Consults belonging to cohort patients
    pub focus_consults: usize,
    /// Consults with HDL evidence
    pub hdl_consults: usize,
    /// Consults with an HDL value after extraction
    pub hdl_values: usize,
    /// Consults with a total cholesterol value after extraction
    pub cholesterol_values: usize,
    /// Consolidated patient records
    pub consolidated_records: usize,
    /// Cohort patients without lab evidence
    pub gap_patients: usize,
}

impl ExtractionStats {
    /// Record the enrichment counts
    pub fn record_enrichment(&mut self, enriched: &EnrichedConsults) {
        self.focus_consults = enriched.focus_consults.len();
        self.hdl_consults = enriched.with_hdl_evidence.len();
        self.hdl_values = enriched.hdl_value_count();
        self.cholesterol_values = enriched.cholesterol_value_count();
    }

    /// Share of the cohort that ended up with a consolidated record, in percent
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.cohort_patients == 0 {
            0.0
        } else {
            self.consolidated_records as f64 / self.cohort_patients as f64 * 100.0
        }
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cholesterol Extraction Summary:")?;
        writeln!(f, "  Total Patients: {}", self.total_patients)?;
        writeln!(f, "  Patients with DM or HTN: {}", self.cohort_patients)?;
        writeln!(f, "  Consults for those patients: {}", self.focus_consults)?;
        writeln!(f, "  Consults mentioning HDL: {}", self.hdl_consults)?;
        writeln!(f, "    with HDL value: {}", self.hdl_values)?;
        writeln!(f, "    with Total Cholesterol value: {}", self.cholesterol_values)?;
        writeln!(
            f,
            "  Patients with cholesterol data: {} ({:.1}%)",
            self.consolidated_records,
            self.coverage_percent()
        )?;
        write!(f, "  Patients without cholesterol data: {}", self.gap_patients)
    }
}
