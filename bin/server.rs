// NutriKids - Web Server
// REST API with Axum: GET /, GET /health, POST /predict

use anyhow::{Context, Result};
use nutrikids::{api, Config, Dataset, ModelStatus, PredictionHandler};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("nutrikids=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("NutriKids Nutrition Prediction Service v{}", nutrikids::VERSION);

    // Startup assets: loaded once, read-only afterwards
    let dataset = Arc::new(Dataset::load_or_unavailable(&config.dataset_path));
    let model = ModelStatus::load(&config.model_path);
    if !model.is_loaded() {
        tracing::warn!("Model unavailable - POST /predict will answer 500 until restarted");
    }

    let handler =
        PredictionHandler::new(dataset, model).with_recommendation_count(config.recommendations);
    let app = api::router(handler);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
