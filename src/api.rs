// 🌐 REST API - axum routes over the prediction handler

use crate::handler::{PredictError, PredictionHandler};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const WELCOME_MESSAGE: &str = "Welcome to NutriKids Nutrition Prediction Service!";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    handler: Arc<PredictionHandler>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// None when the dataset failed to load
    dataset_rows: Option<usize>,
    model_loaded: bool,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET / - Liveness text
async fn index() -> &'static str {
    WELCOME_MESSAGE
}

/// GET /health - Startup asset status
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let dataset = state.handler.dataset();
    Json(HealthResponse {
        status: "ok",
        dataset_rows: dataset.is_available().then(|| dataset.len()),
        model_loaded: state.handler.model().is_loaded(),
    })
}

/// POST /predict - Nutrition status + food recommendations
///
/// The body is read as raw bytes so a missing or wrong content type is
/// reported as "No input data" by the handler instead of by the extractor.
async fn predict(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = state.handler.handle(&body);
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(response.body))
}

/// Panics anywhere below become the same 500 body as internal prediction errors
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Prediction error: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(PredictError::Internal(details).to_body()),
    )
        .into_response()
}

// ============================================================================
// Router
// ============================================================================

pub fn router(handler: PredictionHandler) -> Router {
    let state = AppState {
        handler: Arc::new(handler),
    };

    let routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .with_state(state);

    with_layers(routes)
}

/// Middleware stack shared by every route
pub fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
