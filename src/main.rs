use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nutrikids::handler::{KEY_AGE, KEY_GENDER, KEY_HEIGHT, KEY_WEIGHT};
use nutrikids::{count_matches, Config, Dataset, ModelStatus, NutritionCategory, PredictionHandler};

fn main() -> Result<()> {
    // stderr keeps stdout clean for the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrikids=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;

    match args.get(1).map(String::as_str) {
        Some("predict") => run_predict(&config, &args[2..]),
        Some("dataset") => run_dataset(&config),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("NutriKids v{}", nutrikids::VERSION);
    println!();
    println!("Usage:");
    println!("  nutrikids predict <tb> <bb> <usia> <jenis_kelamin>");
    println!("      Run one prediction offline (height cm, weight kg, age years, Laki-laki|Perempuan)");
    println!("  nutrikids dataset");
    println!("      Summarize the nutrition dataset per category");
    println!();
    println!("Server: cargo run --bin nutrikids-server");
}

fn run_predict(config: &Config, args: &[String]) -> Result<()> {
    if args.len() != 4 {
        bail!("predict expects 4 arguments: <tb> <bb> <usia> <jenis_kelamin>");
    }

    // Numbers that fail to parse are sent as strings so the handler reports them
    let mut body = Map::new();
    for (key, raw) in [KEY_HEIGHT, KEY_WEIGHT, KEY_AGE].iter().zip(&args[..3]) {
        let value = raw
            .parse::<f64>()
            .map(|n| json!(n))
            .unwrap_or_else(|_| json!(raw));
        body.insert(key.to_string(), value);
    }
    body.insert(KEY_GENDER.to_string(), json!(args[3]));

    let dataset = Arc::new(Dataset::load_or_unavailable(&config.dataset_path));
    let model = ModelStatus::load(&config.model_path);
    let handler =
        PredictionHandler::new(dataset, model).with_recommendation_count(config.recommendations);

    let payload = serde_json::to_vec(&Value::Object(body)).context("Failed to encode request")?;
    let response = handler.handle(&payload);

    println!("HTTP {}", response.status);
    println!(
        "{}",
        serde_json::to_string_pretty(&response.body).context("Failed to encode response")?
    );

    Ok(())
}

fn run_dataset(config: &Config) -> Result<()> {
    println!("📂 Loading dataset {:?}...", config.dataset_path);
    let dataset = Dataset::load(&config.dataset_path)?;
    println!("✓ Loaded {} foods", dataset.len());
    println!();

    for category in NutritionCategory::ALL {
        let count = count_matches(category, &dataset)?;
        println!("  {:<12} {:>6} matching foods", category.label(), count);
    }

    Ok(())
}
