//! Cohort patients left without lab evidence

use rustc_hash::FxHashSet;

use crate::models::{EntityModel, Patient};

/// Cohort patients with no consolidated record, in cohort order
#[must_use]
pub fn find_gap_patients<R: EntityModel>(cohort: &[Patient], consolidated: &[R]) -> Vec<Patient> {
    let with_data: FxHashSet<&str> = consolidated.iter().map(EntityModel::patient_id).collect();

    let gaps: Vec<Patient> = cohort
        .iter()
        .filter(|p| !with_data.contains(p.id.as_str()))
        .cloned()
        .collect();

    log::info!(
        "Found {} patients with DM or HTN but no Cholesterol data",
        gaps.len()
    );
    gaps
}

/// The audit line persisted next to the gap report
#[must_use]
pub fn gap_summary_line(gap_count: usize) -> String {
    format!("Patients with DM or HTN but no cholesterol data: {gap_count}\n")
}
