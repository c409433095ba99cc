//! Patient demographics as exported by the clinic

use crate::models::table::Record;
use crate::models::traits::{EntityModel, TableRow};
use crate::schema;

/// A patient row from the patient table
///
/// Only the fields the cohort filters read are typed. Demographics stay in the untouched
/// source row, which derived patient tables and the consult join copy as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    /// Unique patient identifier
    pub id: String,
    /// Community the patient belongs to
    pub community: String,
    /// Whether the patient is flagged as diabetic
    pub diabetic: bool,
    /// Whether the patient is flagged as hypertensive
    pub hypertensive: bool,
    source: Record,
}

impl Patient {
    /// The source row this patient was read from
    #[must_use]
    pub fn source(&self) -> &Record {
        &self.source
    }
}

impl EntityModel for Patient {
    fn patient_id(&self) -> &str {
        &self.id
    }
}

impl TableRow for Patient {
    fn from_record(record: &Record) -> Self {
        Self {
            id: record.get(schema::PATIENT_ID).to_string(),
            community: record.get(schema::COMMUNITY).to_string(),
            diabetic: parse_flag(record.get(schema::DIABETES)),
            hypertensive: parse_flag(record.get(schema::HYPERTENSION)),
            source: record.clone(),
        }
    }

    fn to_record(&self) -> Record {
        self.source.clone()
    }
}

/// Interpret a boolean flag column; only `true` (any case) is set
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Whether a coded sex value means male
#[must_use]
pub fn is_male_code(value: &str) -> bool {
    value.trim() == "1"
}
