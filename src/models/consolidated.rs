//! The single per-patient row produced by the temporal merge

use crate::models::consult::Consult;
use crate::models::patient::Patient;
use crate::models::table::Record;
use crate::models::traits::{EntityModel, TableRow};
use crate::schema;

/// Consult fields joined with the patient's demographics
///
/// All values are kept as the strings found in the source tables; an empty string means
/// the value is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedRecord {
    /// Visit date
    pub date: String,
    /// Clinical note
    pub note: String,
    /// Systolic blood pressure
    pub systolic_bp: String,
    /// Patient identifier as carried by the consult row
    pub patient_id: String,
    /// HDL cholesterol
    pub hdl: String,
    /// Total cholesterol
    pub total_cholesterol: String,
    /// Surname
    pub surname: String,
    /// Given name
    pub given_name: String,
    /// Coded sex
    pub sex: String,
    /// Community
    pub community: String,
    /// Birth year
    pub birth_year: String,
    /// Diabetes flag
    pub diabetes: String,
    /// Hypertension flag
    pub hypertension: String,
}

impl ConsolidatedRecord {
    /// Join a consult with the patient it belongs to
    #[must_use]
    pub fn join(consult: &Consult, patient: &Patient) -> Self {
        let demographics = patient.source();
        Self {
            date: consult.date.clone(),
            note: consult.note.clone(),
            systolic_bp: consult.systolic_bp.clone(),
            patient_id: consult.patient_id.clone(),
            hdl: consult.hdl.clone(),
            total_cholesterol: consult.total_cholesterol.clone(),
            surname: demographics.get(schema::SURNAME).to_string(),
            given_name: demographics.get(schema::GIVEN_NAME).to_string(),
            sex: demographics.get(schema::SEX).to_string(),
            community: demographics.get(schema::COMMUNITY).to_string(),
            birth_year: demographics.get(schema::BIRTH_YEAR).to_string(),
            diabetes: demographics.get(schema::DIABETES).to_string(),
            hypertension: demographics.get(schema::HYPERTENSION).to_string(),
        }
    }

    /// Build a new record from `self` with every empty field taken from `older`
    #[must_use]
    pub fn backfilled_from(&self, older: &Self) -> Self {
        fn pick(newer: &str, older: &str) -> String {
            let value = if newer.is_empty() { older } else { newer };
            value.to_string()
        }

        Self {
            date: pick(&self.date, &older.date),
            note: pick(&self.note, &older.note),
            systolic_bp: pick(&self.systolic_bp, &older.systolic_bp),
            patient_id: pick(&self.patient_id, &older.patient_id),
            hdl: pick(&self.hdl, &older.hdl),
            total_cholesterol: pick(&self.total_cholesterol, &older.total_cholesterol),
            surname: pick(&self.surname, &older.surname),
            given_name: pick(&self.given_name, &older.given_name),
            sex: pick(&self.sex, &older.sex),
            community: pick(&self.community, &older.community),
            birth_year: pick(&self.birth_year, &older.birth_year),
            diabetes: pick(&self.diabetes, &older.diabetes),
            hypertension: pick(&self.hypertension, &older.hypertension),
        }
    }

    /// `(column, value)` pairs in output column order
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 13] {
        [
            (schema::DATE, self.date.as_str()),
            (schema::NOTE, self.note.as_str()),
            (schema::SYSTOLIC_BP, self.systolic_bp.as_str()),
            (schema::CONSULT_PATIENT_ID, self.patient_id.as_str()),
            (schema::HDL, self.hdl.as_str()),
            (schema::TOTAL_CHOLESTEROL, self.total_cholesterol.as_str()),
            (schema::SURNAME, self.surname.as_str()),
            (schema::GIVEN_NAME, self.given_name.as_str()),
            (schema::SEX, self.sex.as_str()),
            (schema::COMMUNITY, self.community.as_str()),
            (schema::BIRTH_YEAR, self.birth_year.as_str()),
            (schema::DIABETES, self.diabetes.as_str()),
            (schema::HYPERTENSION, self.hypertension.as_str()),
        ]
    }
}

impl EntityModel for ConsolidatedRecord {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }
}

impl TableRow for ConsolidatedRecord {
    fn from_record(record: &Record) -> Self {
        Self {
            date: record.get(schema::DATE).to_string(),
            note: record.get(schema::NOTE).to_string(),
            systolic_bp: record.get(schema::SYSTOLIC_BP).to_string(),
            patient_id: record.get(schema::CONSULT_PATIENT_ID).to_string(),
            hdl: record.get(schema::HDL).to_string(),
            total_cholesterol: record.get(schema::TOTAL_CHOLESTEROL).to_string(),
            surname: record.get(schema::SURNAME).to_string(),
            given_name: record.get(schema::GIVEN_NAME).to_string(),
            sex: record.get(schema::SEX).to_string(),
            community: record.get(schema::COMMUNITY).to_string(),
            birth_year: record.get(schema::BIRTH_YEAR).to_string(),
            diabetes: record.get(schema::DIABETES).to_string(),
            hypertension: record.get(schema::HYPERTENSION).to_string(),
        }
    }

    fn to_record(&self) -> Record {
        self.fields().into_iter().collect()
    }
}
