//! Typed risk inputs parsed from a consolidated record

use serde::{Deserialize, Serialize};

use crate::algorithm::risk::RiskError;
use crate::models::ConsolidatedRecord;
use crate::models::patient::{is_male_code, parse_flag};

/// Sex stratum of the risk equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

/// Race stratum of the risk equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    /// African-American
    Black,
    /// White and every other race
    White,
}

/// Risk inputs the clinic export does not record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssumptions {
    /// Score every patient with the African-American equations
    pub black: bool,
    /// Score every patient as a current smoker
    pub smoker: bool,
}

/// Inputs of the 10-year risk equations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactors {
    /// Sex stratum
    pub sex: Sex,
    /// Race stratum
    pub race: Race,
    /// Current smoker
    pub smoker: bool,
    /// On treatment for hypertension
    pub hypertensive: bool,
    /// Diabetic
    pub diabetic: bool,
    /// Age in years
    pub age: f64,
    /// Systolic blood pressure (mmHg)
    pub systolic_bp: f64,
    /// Total cholesterol (mg/dL)
    pub total_cholesterol: f64,
    /// HDL cholesterol (mg/dL)
    pub hdl: f64,
}

impl RiskFactors {
    /// Parse the risk inputs of a consolidated record
    ///
    /// Age is `reference_year - birth year`.
    ///
    /// # Errors
    /// Returns [`RiskError::NotNumeric`] when the birth year or a measurement is missing
    /// or not a number, and [`RiskError::BirthYearOutOfRange`] when no age can be computed
    /// from the birth year.
    pub fn from_record(
        record: &ConsolidatedRecord,
        reference_year: i32,
        assumptions: RiskAssumptions,
    ) -> Result<Self, RiskError> {
        let birth_year: i32 = record
            .birth_year
            .trim()
            .parse()
            .map_err(|_| RiskError::not_numeric("birth year", &record.birth_year))?;
        let age = reference_year
            .checked_sub(birth_year)
            .ok_or(RiskError::BirthYearOutOfRange(birth_year))?;

        Ok(Self {
            sex: if is_male_code(&record.sex) {
                Sex::Male
            } else {
                Sex::Female
            },
            race: if assumptions.black {
                Race::Black
            } else {
                Race::White
            },
            smoker: assumptions.smoker,
            hypertensive: parse_flag(&record.hypertension),
            diabetic: parse_flag(&record.diabetes),
            age: f64::from(age),
            systolic_bp: parse_measurement("systolic blood pressure", &record.systolic_bp)?,
            total_cholesterol: parse_measurement("total cholesterol", &record.total_cholesterol)?,
            hdl: parse_measurement("HDL", &record.hdl)?,
        })
    }
}

/// Parse a numeric lab or vital sign value
///
/// # Errors
/// Returns [`RiskError::NotNumeric`] for empty or non-numeric text.
pub fn parse_measurement(field: &'static str, value: &str) -> Result<f64, RiskError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RiskError::not_numeric(field, value))
}
