//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Training and serving both read from here, so a default changed in one
//! place is changed for both.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PhishGuard";

/// Seed for the train/test shuffle
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Share of rows held out for evaluation
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Vocabulary size cap for the email vectorizer
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Laplace smoothing for multinomial naive Bayes
pub const DEFAULT_NB_ALPHA: f64 = 1.0;

/// Inverse regularization strength for logistic regression
pub const DEFAULT_LOGISTIC_C: f64 = 1.0;

/// Gradient descent iteration cap for logistic regression
pub const DEFAULT_LOGISTIC_MAX_ITER: usize = 1000;

/// Column names of the email dataset
pub const EMAIL_TEXT_COLUMN: &str = "Email Text";
pub const EMAIL_LABEL_COLUMN: &str = "Email Type";

/// Column names of the URL dataset
pub const URL_COLUMN: &str = "URL";
pub const URL_LABEL_COLUMN: &str = "label";

// ============================================
// Helper functions to read from env with fallback
// ============================================

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("phishguard")
}

/// Get model artifact directory from environment or use default
pub fn get_model_dir() -> PathBuf {
    std::env::var("PHISHGUARD_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("models"))
}

/// Get prediction log directory from environment or use default
pub fn get_prediction_log_dir() -> PathBuf {
    std::env::var("PHISHGUARD_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("predictions"))
}
