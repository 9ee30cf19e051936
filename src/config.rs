// ⚙️ Configuration - process environment, read once at startup

use crate::recommender::DEFAULT_RECOMMENDATIONS;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATASET_PATH: &str = "/app/food-data.csv";
pub const DEFAULT_MODEL_PATH: &str = "/app/model_nutrition_stat.h5";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub recommendations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            recommendations: DEFAULT_RECOMMENDATIONS,
        }
    }
}

impl Config {
    /// Read configuration from the environment (and `.env`, if present)
    ///
    /// - `HOST`, `PORT`: listen address
    /// - `NUTRIKIDS_DATASET`: nutrition CSV
    /// - `NUTRIKIDS_MODEL`: persisted model artifact
    /// - `NUTRIKIDS_RECOMMENDATIONS`: foods per prediction
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {:?}", port))?;
        }
        if let Some(path) = lookup("NUTRIKIDS_DATASET") {
            config.dataset_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("NUTRIKIDS_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(count) = lookup("NUTRIKIDS_RECOMMENDATIONS") {
            config.recommendations = count
                .trim()
                .parse()
                .with_context(|| format!("Invalid NUTRIKIDS_RECOMMENDATIONS: {:?}", count))?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
