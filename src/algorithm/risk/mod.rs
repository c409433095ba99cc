//! 10-year ASCVD risk estimation
//!
//! Records missing a required value are expected in clinic data: scoring them yields a
//! [`RiskError`] that callers record and move past.

pub mod factors;
pub mod pooled_cohort;

use std::fmt;

use indicatif::ProgressBar;

use crate::models::{ConsolidatedRecord, EntityModel, Record, TableRow};
use crate::schema;

pub use factors::{Race, RiskAssumptions, RiskFactors, Sex};
pub use pooled_cohort::ten_year_risk;

/// Reasons a record cannot be scored
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    /// A required value is missing or not a number
    #[error("{field} is not a number: '{value}'")]
    NotNumeric {
        /// Name of the offending input
        field: &'static str,
        /// The raw value
        value: String,
    },

    /// A measurement is zero or negative
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending input
        field: &'static str,
        /// The parsed value
        value: f64,
    },

    /// Birth year too far from the reference year to give an age
    #[error("birth year {0} does not give an age")]
    BirthYearOutOfRange(i32),

    /// Age outside the range the equations were derived for
    #[error("age {0} is outside the 40-79 range of the risk equations")]
    AgeOutOfRange(f64),
}

impl RiskError {
    /// Create a not-numeric error
    pub fn not_numeric(field: &'static str, value: impl Into<String>) -> Self {
        Self::NotNumeric {
            field,
            value: value.into(),
        }
    }
}

/// Settings of the risk stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskSettings {
    /// Year ages are computed at
    pub reference_year: i32,
    /// Inputs not present in the data
    pub assumptions: RiskAssumptions,
}

/// Score one consolidated record
///
/// # Errors
/// Returns a [`RiskError`] when the record cannot be scored.
pub fn score_record(
    record: &ConsolidatedRecord,
    settings: &RiskSettings,
) -> Result<f64, RiskError> {
    let factors = RiskFactors::from_record(record, settings.reference_year, settings.assumptions)?;
    ten_year_risk(&factors)
}

/// A consolidated record with its risk estimate, if one could be computed
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    /// The consolidated record
    pub record: ConsolidatedRecord,
    /// 10-year risk, `None` when the record could not be scored
    pub risk: Option<f64>,
}

impl EntityModel for ScoredRecord {
    fn patient_id(&self) -> &str {
        &self.record.patient_id
    }
}

impl TableRow for ScoredRecord {
    fn from_record(record: &Record) -> Self {
        Self {
            record: ConsolidatedRecord::from_record(record),
            risk: record.get(schema::ASCVD_10_YEAR).trim().parse().ok(),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = self.record.to_record();
        record.set(
            schema::ASCVD_10_YEAR,
            self.risk.map(|r| r.to_string()).unwrap_or_default(),
        );
        record
    }
}

/// Counts of the risk stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskStats {
    /// Records with a risk estimate
    pub scored: usize,
    /// Records written without one
    pub unscored: usize,
}

impl fmt::Display for RiskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Computed ASCVD 10-year risk for {} of {} patients ({} missing required data)",
            self.scored,
            self.scored + self.unscored,
            self.unscored
        )
    }
}

/// Score every record; failures leave the record without an estimate
pub fn score_records(
    records: &[ConsolidatedRecord],
    settings: &RiskSettings,
    progress: &ProgressBar,
) -> (Vec<ScoredRecord>, RiskStats) {
    let mut stats = RiskStats::default();
    let scored: Vec<ScoredRecord> = records
        .iter()
        .map(|record| {
            let risk = match score_record(record, settings) {
                Ok(risk) => {
                    stats.scored += 1;
                    Some(risk)
                }
                Err(e) => {
                    log::debug!("No risk estimate for patient {}: {e}", record.patient_id);
                    stats.unscored += 1;
                    None
                }
            };
            progress.inc(1);
            ScoredRecord {
                record: record.clone(),
                risk,
            }
        })
        .collect();

    (scored, stats)
}
