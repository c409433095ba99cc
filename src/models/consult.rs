//! Clinic visits with free-text notes

use crate::models::table::Record;
use crate::models::traits::{EntityModel, TableRow};
use crate::schema;

/// A consult row from the consult table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consult {
    /// Identifier of the patient seen at this visit, as written on the consult row
    pub patient_id: String,
    /// Visit date, free text
    pub date: String,
    /// Free-text clinical note
    pub note: String,
    /// Systolic blood pressure, possibly empty
    pub systolic_bp: String,
    /// HDL cholesterol, possibly empty
    pub hdl: String,
    /// Total cholesterol, possibly empty
    pub total_cholesterol: String,
    source: Record,
}

impl Consult {
    /// The source row this consult was read from
    #[must_use]
    pub fn source(&self) -> &Record {
        &self.source
    }

    /// A copy of this consult with both lab fields replaced
    ///
    /// The source row is updated as well, so the copy serializes with the new values.
    #[must_use]
    pub fn with_lab_values(&self, hdl: String, total_cholesterol: String) -> Self {
        let mut source = self.source.clone();
        source.set(schema::HDL, hdl.clone());
        source.set(schema::TOTAL_CHOLESTEROL, total_cholesterol.clone());
        Self {
            hdl,
            total_cholesterol,
            source,
            ..self.clone()
        }
    }
}

impl EntityModel for Consult {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }
}

impl TableRow for Consult {
    fn from_record(record: &Record) -> Self {
        Self {
            patient_id: record.get(schema::CONSULT_PATIENT_ID).to_string(),
            date: record.get(schema::DATE).to_string(),
            note: record.get(schema::NOTE).to_string(),
            systolic_bp: record.get(schema::SYSTOLIC_BP).to_string(),
            hdl: record.get(schema::HDL).to_string(),
            total_cholesterol: record.get(schema::TOTAL_CHOLESTEROL).to_string(),
            source: record.clone(),
        }
    }

    fn to_record(&self) -> Record {
        self.source.clone()
    }
}
