//! Configuration module

use std::env;
use std::path::PathBuf;

use phishguard_core::constants::{get_model_dir, get_prediction_log_dir};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the six model artifacts
    pub model_dir: PathBuf,

    /// JSONL prediction log directory (used when no database is configured)
    pub prediction_log_dir: PathBuf,

    /// PostgreSQL URL; when set, predictions are logged to `prediction_logs`
    pub database_url: Option<String>,

    /// Set PREDICTION_LOG=off to disable prediction logging entirely
    pub prediction_log_enabled: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| get_model_dir()),

            prediction_log_dir: env::var("PREDICTION_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| get_prediction_log_dir()),

            database_url: env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty()),

            prediction_log_enabled: env::var("PREDICTION_LOG")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "off" | "false" | "0"))
                .unwrap_or(true),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
