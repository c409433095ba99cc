//! Pooled Cohort Equations for the 10-year risk of a first hard ASCVD event
//!
//! Goff DC Jr et al., 2013 ACC/AHA Guideline on the Assessment of Cardiovascular Risk.
//! One coefficient set per sex and race stratum:
//!
//! `risk = 1 - S10 ^ exp(sum(coef * x) - mean)`

use crate::algorithm::risk::factors::{Race, RiskFactors, Sex};
use crate::algorithm::risk::RiskError;

/// Youngest age the equations were derived for
pub const MIN_AGE: f64 = 40.0;
/// Oldest age the equations were derived for
pub const MAX_AGE: f64 = 79.0;

/// Coefficients of one stratum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// ln(age)
    pub ln_age: f64,
    /// ln(age)^2
    pub ln_age_squared: f64,
    /// ln(total cholesterol)
    pub ln_total_cholesterol: f64,
    /// ln(age) * ln(total cholesterol)
    pub ln_age_ln_total_cholesterol: f64,
    /// ln(HDL)
    pub ln_hdl: f64,
    /// ln(age) * ln(HDL)
    pub ln_age_ln_hdl: f64,
    /// ln(treated systolic BP)
    pub ln_treated_sbp: f64,
    /// ln(age) * ln(treated systolic BP)
    pub ln_age_ln_treated_sbp: f64,
    /// ln(untreated systolic BP)
    pub ln_untreated_sbp: f64,
    /// ln(age) * ln(untreated systolic BP)
    pub ln_age_ln_untreated_sbp: f64,
    /// current smoker
    pub smoker: f64,
    /// ln(age) * current smoker
    pub ln_age_smoker: f64,
    /// diabetes
    pub diabetic: f64,
    /// baseline 10-year survival
    pub baseline_survival: f64,
    /// mean of the linear predictor in the derivation cohort
    pub mean: f64,
}

/// White (non-black) women
pub const WHITE_FEMALE: Coefficients = Coefficients {
    ln_age: -29.799,
    ln_age_squared: 4.884,
    ln_total_cholesterol: 13.54,
    ln_age_ln_total_cholesterol: -3.114,
    ln_hdl: -13.578,
    ln_age_ln_hdl: 3.149,
    ln_treated_sbp: 2.019,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.957,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 7.574,
    ln_age_smoker: -1.665,
    diabetic: 0.661,
    baseline_survival: 0.96652,
    mean: -29.1817,
};

/// African-American women
pub const BLACK_FEMALE: Coefficients = Coefficients {
    ln_age: 17.1141,
    ln_age_squared: 0.0,
    ln_total_cholesterol: 0.9396,
    ln_age_ln_total_cholesterol: 0.0,
    ln_hdl: -18.9196,
    ln_age_ln_hdl: 4.4748,
    ln_treated_sbp: 29.2907,
    ln_age_ln_treated_sbp: -6.4321,
    ln_untreated_sbp: 27.8197,
    ln_age_ln_untreated_sbp: -6.0873,
    smoker: 0.6908,
    ln_age_smoker: 0.0,
    diabetic: 0.8738,
    baseline_survival: 0.95334,
    mean: 86.6081,
};

/// White (non-black) men
pub const WHITE_MALE: Coefficients = Coefficients {
    ln_age: 12.344,
    ln_age_squared: 0.0,
    ln_total_cholesterol: 11.853,
    ln_age_ln_total_cholesterol: -2.664,
    ln_hdl: -7.99,
    ln_age_ln_hdl: 1.769,
    ln_treated_sbp: 1.797,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.764,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 7.837,
    ln_age_smoker: -1.795,
    diabetic: 0.658,
    baseline_survival: 0.91436,
    mean: 61.1816,
};

/// African-American men
pub const BLACK_MALE: Coefficients = Coefficients {
    ln_age: 2.469,
    ln_age_squared: 0.0,
    ln_total_cholesterol: 0.302,
    ln_age_ln_total_cholesterol: 0.0,
    ln_hdl: -0.307,
    ln_age_ln_hdl: 0.0,
    ln_treated_sbp: 1.916,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.809,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 0.549,
    ln_age_smoker: 0.0,
    diabetic: 0.645,
    baseline_survival: 0.89536,
    mean: 19.5425,
};

/// Coefficient set for a sex and race stratum
#[must_use]
pub const fn coefficients(sex: Sex, race: Race) -> &'static Coefficients {
    match (sex, race) {
        (Sex::Female, Race::White) => &WHITE_FEMALE,
        (Sex::Female, Race::Black) => &BLACK_FEMALE,
        (Sex::Male, Race::White) => &WHITE_MALE,
        (Sex::Male, Race::Black) => &BLACK_MALE,
    }
}

/// 10-year ASCVD risk as a probability in `[0, 1]`
///
/// Systolic blood pressure enters as treated when the patient is hypertensive.
///
/// # Errors
/// Returns [`RiskError::AgeOutOfRange`] outside the 40-79 age range and
/// [`RiskError::NotPositive`] for a non-positive measurement.
pub fn ten_year_risk(factors: &RiskFactors) -> Result<f64, RiskError> {
    if !(MIN_AGE..=MAX_AGE).contains(&factors.age) {
        return Err(RiskError::AgeOutOfRange(factors.age));
    }
    for (field, value) in [
        ("systolic blood pressure", factors.systolic_bp),
        ("total cholesterol", factors.total_cholesterol),
        ("HDL", factors.hdl),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(RiskError::NotPositive { field, value });
        }
    }

    let c = coefficients(factors.sex, factors.race);

    let ln_age = factors.age.ln();
    let ln_tc = factors.total_cholesterol.ln();
    let ln_hdl = factors.hdl.ln();
    let ln_sbp = factors.systolic_bp.ln();
    let (treated, untreated) = if factors.hypertensive {
        (ln_sbp, 0.0)
    } else {
        (0.0, ln_sbp)
    };
    let smoker = f64::from(u8::from(factors.smoker));
    let diabetic = f64::from(u8::from(factors.diabetic));

    let sum = c.ln_age * ln_age
        + c.ln_age_squared * ln_age * ln_age
        + c.ln_total_cholesterol * ln_tc
        + c.ln_age_ln_total_cholesterol * ln_age * ln_tc
        + c.ln_hdl * ln_hdl
        + c.ln_age_ln_hdl * ln_age * ln_hdl
        + c.ln_treated_sbp * treated
        + c.ln_age_ln_treated_sbp * ln_age * treated
        + c.ln_untreated_sbp * untreated
        + c.ln_age_ln_untreated_sbp * ln_age * untreated
        + c.smoker * smoker
        + c.ln_age_smoker * ln_age * smoker
        + c.diabetic * diabetic;

    Ok(1.0 - c.baseline_survival.powf((sum - c.mean).exp()))
}
