//! Column layout of the clinic export tables.
//!
//! The patient and consult exports use Spanish headers; the consolidated table keeps them so
//! that downstream users can open every artifact side by side.

pub mod date_utils;

pub use date_utils::{DateFormatConfig, parse_date_string};

/// Patient identifier column in the patient table
pub const PATIENT_ID: &str = "CesID";
/// Patient identifier column in the consult table (and in the consolidated output)
pub const CONSULT_PATIENT_ID: &str = "CESid";

/// Patient surname
pub const SURNAME: &str = "Apellido";
/// Patient given name
pub const GIVEN_NAME: &str = "Nombre";
/// Coded sex, `1` is male
pub const SEX: &str = "Sexo";
/// Community the patient belongs to
pub const COMMUNITY: &str = "Comunidad";
/// Birth year
pub const BIRTH_YEAR: &str = "FN_Ano";
/// Diabetes flag (`true`/`false`)
pub const DIABETES: &str = "Diabetes";
/// Hypertension flag (`true`/`false`)
pub const HYPERTENSION: &str = "Hipertensión";

/// Visit date (free text)
pub const DATE: &str = "Fecha";
/// Free-text clinical note
pub const NOTE: &str = "Nota";
/// Systolic blood pressure
pub const SYSTOLIC_BP: &str = "PA Sistólica";
/// HDL cholesterol
pub const HDL: &str = "HDL";
/// Total cholesterol
pub const TOTAL_CHOLESTEROL: &str = "Colesterol";

/// Risk estimate column appended by the risk stage
pub const ASCVD_10_YEAR: &str = "ASCVD 10 year";

/// Columns the patient table must provide
pub const PATIENT_REQUIRED_COLUMNS: [&str; 8] = [
    PATIENT_ID,
    SURNAME,
    GIVEN_NAME,
    SEX,
    COMMUNITY,
    BIRTH_YEAR,
    DIABETES,
    HYPERTENSION,
];

/// Columns the consult table must provide
pub const CONSULT_REQUIRED_COLUMNS: [&str; 6] = [
    CONSULT_PATIENT_ID,
    DATE,
    NOTE,
    SYSTOLIC_BP,
    HDL,
    TOTAL_CHOLESTEROL,
];

/// Consult-derived columns of a consolidated record, in output order
pub const CONSULT_OUTPUT_FIELDS: [&str; 6] = [
    DATE,
    NOTE,
    SYSTOLIC_BP,
    CONSULT_PATIENT_ID,
    HDL,
    TOTAL_CHOLESTEROL,
];

/// Patient-derived columns of a consolidated record, in output order
pub const PATIENT_OUTPUT_FIELDS: [&str; 7] = [
    SURNAME,
    GIVEN_NAME,
    SEX,
    COMMUNITY,
    BIRTH_YEAR,
    DIABETES,
    HYPERTENSION,
];

/// All consolidated record columns, consult fields first
#[must_use]
pub fn consolidated_columns() -> Vec<String> {
    CONSULT_OUTPUT_FIELDS
        .iter()
        .chain(PATIENT_OUTPUT_FIELDS.iter())
        .map(|c| (*c).to_string())
        .collect()
}

/// Consolidated columns followed by the risk estimate column
#[must_use]
pub fn risk_output_columns() -> Vec<String> {
    let mut columns = consolidated_columns();
    columns.push(ASCVD_10_YEAR.to_string());
    columns
}
