//! Cohort selection
//!
//! The study population is the set of patients with a chronic condition flag. Criteria are
//! composable so other inclusion rules can be expressed the same way.

use rustc_hash::FxHashSet;

use crate::models::Patient;

/// Defines a criterion for filtering entities
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A filter that can be applied to a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientFilter {
    /// Patient is flagged as diabetic
    Diabetic,
    /// Patient is flagged as hypertensive
    Hypertensive,
    /// Patient belongs to the given community (exact match)
    Community(String),
    /// Combined filter that requires all criteria to be met
    All(Vec<PatientFilter>),
    /// Combined filter that requires any criterion to be met
    Any(Vec<PatientFilter>),
}

impl PatientFilter {
    /// Diabetic or hypertensive, the inclusion rule of the lipid study
    #[must_use]
    pub fn chronic_condition() -> Self {
        Self::Any(vec![Self::Diabetic, Self::Hypertensive])
    }
}

impl Default for PatientFilter {
    fn default() -> Self {
        Self::chronic_condition()
    }
}

impl FilterCriteria<Patient> for PatientFilter {
    fn meets_criteria(&self, patient: &Patient) -> bool {
        match self {
            Self::Diabetic => patient.diabetic,
            Self::Hypertensive => patient.hypertensive,
            Self::Community(name) => patient.community == *name,
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(patient)),
            Self::Any(filters) => filters.iter().any(|f| f.meets_criteria(patient)),
        }
    }
}

/// Select the patients meeting `criteria`, preserving input order
#[must_use]
pub fn select_cohort<F: FilterCriteria<Patient>>(
    patients: &[Patient],
    criteria: &F,
) -> Vec<Patient> {
    let cohort: Vec<Patient> = patients
        .iter()
        .filter(|p| criteria.meets_criteria(p))
        .cloned()
        .collect();

    log::info!(
        "Out of {} total patients, found {} with DM or HTN",
        patients.len(),
        cohort.len()
    );

    cohort
}

/// Select diabetic or hypertensive patients
#[must_use]
pub fn filter_cohort(patients: &[Patient]) -> Vec<Patient> {
    select_cohort(patients, &PatientFilter::chronic_condition())
}

/// Identifier set of a cohort, used for the consult join
#[must_use]
pub fn cohort_ids(cohort: &[Patient]) -> FxHashSet<&str> {
    cohort.iter().map(|p| p.id.as_str()).collect()
}
