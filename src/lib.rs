// NutriKids - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod measurement;
pub mod validation;
pub mod classifier;
pub mod dataset;
pub mod recommender;
pub mod model;
pub mod config;
pub mod handler;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use measurement::{compute_bmi, round2, Gender, PatientMeasurement};
pub use validation::{validate, validate_with_age_label, ValidationError};
pub use classifier::{classify, NutritionCategory};
pub use dataset::{Dataset, FoodRecord, LookupError};
pub use recommender::{
    count_matches, recommend, recommend_with_rng, try_recommend_with_rng, DEFAULT_RECOMMENDATIONS,
};
pub use model::ModelStatus;
pub use config::Config;
pub use handler::{
    FoodRecommendation, HandlerResponse, PredictError, PredictionHandler, PredictionResponse,
    PredictionResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
