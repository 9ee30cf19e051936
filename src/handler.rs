// 🩺 Prediction Handler - validate → classify → recommend → respond
//
// Transport independent: takes the raw request body and returns a status
// code plus JSON body. The HTTP layer (api.rs) and the CLI both drive it.

use crate::classifier::{classify, NutritionCategory};
use crate::dataset::{Dataset, FoodRecord};
use crate::measurement::{round2, PatientMeasurement};
use crate::model::ModelStatus;
use crate::recommender::{recommend, DEFAULT_RECOMMENDATIONS};
use crate::validation::{validate_with_age_label, ValidationError};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Request keys, in the order their presence is checked
pub const KEY_HEIGHT: &str = "tb";
pub const KEY_WEIGHT: &str = "bb";
pub const KEY_AGE: &str = "usia";
pub const KEY_GENDER: &str = "jenis_kelamin";
pub const REQUIRED_KEYS: [&str; 4] = [KEY_HEIGHT, KEY_WEIGHT, KEY_AGE, KEY_GENDER];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Absent, unparseable, non-object or empty body
    #[error("No input data")]
    MalformedBody,

    #[error("Missing key: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for key: {0} (expected a number)")]
    InvalidNumber(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Prediction processing failed: {0}")]
    Internal(String),
}

impl PredictError {
    pub fn status_code(&self) -> u16 {
        match self {
            PredictError::MalformedBody
            | PredictError::MissingField(_)
            | PredictError::InvalidNumber(_)
            | PredictError::Validation(_) => 400,
            PredictError::ModelUnavailable | PredictError::Internal(_) => 500,
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            PredictError::Internal(details) => json!({
                "error": INTERNAL_ERROR_MESSAGE,
                "details": details,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Prediction processing failed";

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub measurement: PatientMeasurement,
    /// Rounded to two decimals
    pub bmi: f64,
    pub category: NutritionCategory,
    pub description: &'static str,
    pub recommendations: Vec<FoodRecord>,
}

/// Wire shape of a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub bmi: f64,
    pub prediction: NutritionCategory,
    pub description: &'static str,
    pub recommendations: Vec<FoodRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct FoodRecommendation {
    pub food: String,
    #[serde(rename = "Caloric Value")]
    pub caloric_value: Option<f64>,
    /// null when the dataset cell was blank
    #[serde(rename = "Protein")]
    pub protein: Option<f64>,
}

impl From<FoodRecord> for FoodRecommendation {
    fn from(record: FoodRecord) -> Self {
        Self {
            food: record.name,
            caloric_value: record.caloric_value,
            protein: record.protein,
        }
    }
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            bmi: result.bmi,
            prediction: result.category,
            description: result.description,
            recommendations: result.recommendations.into_iter().map(|r| r.into()).collect(),
        }
    }
}

/// Status code and JSON body, ready for any transport
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    fn from_error(error: &PredictError) -> Self {
        Self {
            status: error.status_code(),
            body: error.to_body(),
        }
    }
}

// ============================================================================
// HANDLER
// ============================================================================

/// Request handler with its startup dependencies injected.
/// Both are read-only after construction and shared across requests.
#[derive(Debug, Clone)]
pub struct PredictionHandler {
    dataset: Arc<Dataset>,
    model: ModelStatus,
    recommendations: usize,
}

impl PredictionHandler {
    pub fn new(dataset: Arc<Dataset>, model: ModelStatus) -> Self {
        PredictionHandler {
            dataset,
            model,
            recommendations: DEFAULT_RECOMMENDATIONS,
        }
    }

    pub fn with_recommendation_count(mut self, n: usize) -> Self {
        self.recommendations = n;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn model(&self) -> &ModelStatus {
        &self.model
    }

    /// Run a request body through the pipeline and map the outcome to a response
    pub fn handle(&self, body: &[u8]) -> HandlerResponse {
        let outcome = self
            .predict(body)
            .and_then(|result| render(PredictionResponse::from(result)));

        match outcome {
            Ok(body) => HandlerResponse { status: 200, body },
            Err(e) => {
                match &e {
                    PredictError::Internal(details) => tracing::error!("Prediction error: {}", details),
                    PredictError::ModelUnavailable => tracing::warn!("Prediction rejected: model not loaded"),
                    other => tracing::debug!("Prediction rejected: {}", other),
                }
                HandlerResponse::from_error(&e)
            }
        }
    }

    pub fn predict(&self, body: &[u8]) -> Result<PredictionResult, PredictError> {
        if !self.model.is_loaded() {
            return Err(PredictError::ModelUnavailable);
        }

        let fields = parse_body(body)?;
        for key in REQUIRED_KEYS {
            if !fields.contains_key(key) {
                return Err(PredictError::MissingField(key));
            }
        }

        let height_cm = number_field(&fields, KEY_HEIGHT)?;
        let weight_kg = number_field(&fields, KEY_WEIGHT)?;
        let age_years = number_field(&fields, KEY_AGE)?;
        // JSON number text as sent: `8` and `8.0` are quoted differently
        let age_label = fields.get(KEY_AGE).map(Value::to_string).unwrap_or_default();
        // a non-string gender can never match, so the validator reports it
        let gender = fields.get(KEY_GENDER).and_then(Value::as_str).unwrap_or_default();

        let measurement =
            validate_with_age_label(height_cm, weight_kg, age_years, &age_label, gender)?;

        self.compute(measurement)
    }

    fn compute(&self, measurement: PatientMeasurement) -> Result<PredictionResult, PredictError> {
        let bmi = measurement.bmi();
        if !bmi.is_finite() || bmi <= 0.0 {
            return Err(PredictError::Internal(format!("BMI computation produced {}", bmi)));
        }

        let category = classify(bmi);
        let recommendations = recommend(category, self.recommendations, &self.dataset);

        tracing::debug!(
            bmi,
            category = %category,
            recommendations = recommendations.len(),
            "Prediction computed"
        );

        Ok(PredictionResult {
            measurement,
            bmi: round2(bmi),
            category,
            description: category.description(),
            recommendations,
        })
    }
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, PredictError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) if !fields.is_empty() => Ok(fields),
        _ => Err(PredictError::MalformedBody),
    }
}

fn number_field(fields: &Map<String, Value>, key: &'static str) -> Result<f64, PredictError> {
    fields
        .get(key)
        .and_then(Value::as_f64)
        .ok_or(PredictError::InvalidNumber(key))
}

fn render(response: PredictionResponse) -> Result<Value, PredictError> {
    serde_json::to_value(response).map_err(|e| PredictError::Internal(e.to_string()))
}
