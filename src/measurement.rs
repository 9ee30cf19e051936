// 📏 Measurements - typed patient input and BMI arithmetic

use serde::{Deserialize, Serialize};

// ============================================================================
// GENDER
// ============================================================================

/// Gender as accepted on the wire. Only the two Indonesian labels are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Laki-laki",
            Gender::Female => "Perempuan",
        }
    }

    /// Exact, case-sensitive match against the wire labels
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Laki-laki" => Some(Gender::Male),
            "Perempuan" => Some(Gender::Female),
            _ => None,
        }
    }
}

// ============================================================================
// PATIENT MEASUREMENT
// ============================================================================

/// A validated measurement. Only `validation::validate` builds these from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientMeasurement {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub gender: Gender,
}

impl PatientMeasurement {
    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height_cm, self.weight_kg)
    }

    pub fn is_minor(&self) -> bool {
        self.age_years < 18.0
    }
}

/// weight_kg / (height_cm / 100)²
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round to two decimals the same way `{:.2}` renders the value,
/// so the reported BMI always agrees with the one quoted in error messages.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
