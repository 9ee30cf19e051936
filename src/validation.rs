// ✅ Input Validation - physiological plausibility checks
// Checks run in a fixed order and stop at the first failure.

use crate::measurement::{compute_bmi, Gender, PatientMeasurement};
use std::ops::RangeInclusive;
use thiserror::Error;

// ============================================================================
// BOUNDS
// ============================================================================

pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 50.0..=220.0;
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 10.0..=250.0;
pub const AGE_RANGE_YEARS: RangeInclusive<f64> = 1.0..=100.0;

/// Plausible BMI band below the adult age threshold
pub const MINOR_BMI_RANGE: RangeInclusive<f64> = 10.0..=35.0;
pub const ADULT_BMI_RANGE: RangeInclusive<f64> = 15.0..=40.0;

pub const ADULT_AGE_YEARS: f64 = 18.0;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid height (50-220 cm)")]
    Height,

    #[error("Invalid weight (10-250 kg)")]
    Weight,

    #[error("Invalid age (1-100 years)")]
    Age,

    /// `age` is the age as the caller wrote it (`8` and `8.0` stay distinct)
    #[error("Unrealistic BMI for age {age} (BMI: {bmi:.2})")]
    MinorBmi { age: String, bmi: f64 },

    #[error("Unrealistic adult BMI (BMI: {bmi:.2})")]
    AdultBmi { bmi: f64 },

    #[error("Gender must be 'Laki-laki' or 'Perempuan'")]
    Gender,
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate raw request fields and build a typed measurement.
///
/// Order: height, weight, age, age-conditioned BMI, gender. All bounds inclusive.
pub fn validate(
    height_cm: f64,
    weight_kg: f64,
    age_years: f64,
    gender: &str,
) -> Result<PatientMeasurement, ValidationError> {
    validate_with_age_label(height_cm, weight_kg, age_years, &age_years.to_string(), gender)
}

/// Same as `validate`, quoting `age_label` instead of the parsed age in the BMI message
pub fn validate_with_age_label(
    height_cm: f64,
    weight_kg: f64,
    age_years: f64,
    age_label: &str,
    gender: &str,
) -> Result<PatientMeasurement, ValidationError> {
    if !HEIGHT_RANGE_CM.contains(&height_cm) {
        return Err(ValidationError::Height);
    }
    if !WEIGHT_RANGE_KG.contains(&weight_kg) {
        return Err(ValidationError::Weight);
    }
    if !AGE_RANGE_YEARS.contains(&age_years) {
        return Err(ValidationError::Age);
    }

    let bmi = compute_bmi(height_cm, weight_kg);
    if age_years < ADULT_AGE_YEARS {
        if !MINOR_BMI_RANGE.contains(&bmi) {
            return Err(ValidationError::MinorBmi {
                age: age_label.to_string(),
                bmi,
            });
        }
    } else if !ADULT_BMI_RANGE.contains(&bmi) {
        return Err(ValidationError::AdultBmi { bmi });
    }

    let gender = Gender::parse(gender).ok_or(ValidationError::Gender)?;

    Ok(PatientMeasurement {
        height_cm,
        weight_kg,
        age_years,
        gender,
    })
}
