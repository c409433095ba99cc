//! Consult enrichment and the consult/patient join
//!
//! Consults of cohort patients get their missing lab fields filled from the note text.
//! Only consults with HDL evidence are kept: a populated HDL field, or a note mentioning
//! `hdl` even when no number could be read.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithm::extraction::{ExtractedValue, extract_hdl, extract_total_cholesterol};
use crate::models::{ConsolidatedRecord, Consult, Patient};

/// Result of enriching the consults of a cohort
#[derive(Debug, Clone, Default)]
pub struct EnrichedConsults {
    /// Consults belonging to cohort patients, as read
    pub focus_consults: Vec<Consult>,
    /// Consults with HDL evidence, lab fields resolved
    pub with_hdl_evidence: Vec<Consult>,
}

impl EnrichedConsults {
    /// Retained consults with an HDL value
    #[must_use]
    pub fn hdl_value_count(&self) -> usize {
        self.with_hdl_evidence
            .iter()
            .filter(|c| !c.hdl.is_empty())
            .count()
    }

    /// Retained consults with a total cholesterol value
    #[must_use]
    pub fn cholesterol_value_count(&self) -> usize {
        self.with_hdl_evidence
            .iter()
            .filter(|c| !c.total_cholesterol.is_empty())
            .count()
    }
}

/// HDL outcome for a consult: the recorded value if present, otherwise the note
#[must_use]
pub fn resolve_hdl(consult: &Consult) -> ExtractedValue {
    if consult.hdl.is_empty() {
        extract_hdl(&consult.note)
    } else {
        ExtractedValue::Found(consult.hdl.clone())
    }
}

/// Total cholesterol for a consult: the recorded value if present, otherwise the note
#[must_use]
pub fn resolve_total_cholesterol(consult: &Consult) -> String {
    if consult.total_cholesterol.is_empty() {
        extract_total_cholesterol(&consult.note).unwrap_or_default()
    } else {
        consult.total_cholesterol.clone()
    }
}

/// Resolve both lab fields of a consult
///
/// Returns `None` when the consult has no HDL evidence at all; such consults are dropped
/// whatever their cholesterol data.
#[must_use]
pub fn enrich_consult(consult: &Consult) -> Option<Consult> {
    let hdl = resolve_hdl(consult);
    if !hdl.has_evidence() {
        return None;
    }
    Some(consult.with_lab_values(hdl.into_cell(), resolve_total_cholesterol(consult)))
}

/// Keep the consults of cohort patients and enrich them
///
/// Output order follows the input order.
#[must_use]
pub fn enrich_consults(cohort_ids: &FxHashSet<&str>, consults: &[Consult]) -> EnrichedConsults {
    let focus_consults: Vec<Consult> = consults
        .iter()
        .filter(|c| cohort_ids.contains(c.patient_id.as_str()))
        .cloned()
        .collect();
    log::info!("Found {} consults for those patients", focus_consults.len());

    let with_hdl_evidence: Vec<Consult> =
        focus_consults.iter().filter_map(enrich_consult).collect();

    let enriched = EnrichedConsults {
        focus_consults,
        with_hdl_evidence,
    };
    log::info!(
        "Found {} consults mentioning 'hdl'. Of these, extracted HDL for {} of them, \
         and Total Cholesterol for {} of them",
        enriched.with_hdl_evidence.len(),
        enriched.hdl_value_count(),
        enriched.cholesterol_value_count()
    );

    enriched
}

/// Join consults with their patients' demographic fields
///
/// Consults whose patient is not in `patients` are skipped with a warning.
#[must_use]
pub fn join_with_patients(patients: &[Patient], consults: &[Consult]) -> Vec<ConsolidatedRecord> {
    let patient_by_id: FxHashMap<&str, &Patient> =
        patients.iter().map(|p| (p.id.as_str(), p)).collect();

    consults
        .iter()
        .filter_map(|consult| match patient_by_id.get(consult.patient_id.as_str()) {
            Some(patient) => Some(ConsolidatedRecord::join(consult, patient)),
            None => {
                log::warn!(
                    "Consult references unknown patient {}, skipping",
                    consult.patient_id
                );
                None
            }
        })
        .collect()
}
