//! Error Handling
//!
//! Typed errors for every inference and training path.
//! Feature-level schema drift is NOT an error here: it is reported through
//! `SchemaDiagnostics` alongside the prediction.

use thiserror::Error;

/// Result alias used throughout the crate
pub type DetectorResult<T> = Result<T, DetectorError>;

#[derive(Debug, Error)]
pub enum DetectorError {
    /// Empty or missing URL / email text, rejected before feature extraction
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Artifacts that cannot be used together (e.g. scaler fit on another schema)
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Missing or corrupt persisted artifact
    #[error("failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    /// Unusable training data (empty, single-class, missing columns)
    #[error("training data error: {0}")]
    TrainingData(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl DetectorError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DetectorError::InvalidInput(msg.into())
    }

    pub fn artifact(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        DetectorError::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    pub fn training(msg: impl Into<String>) -> Self {
        DetectorError::TrainingData(msg.into())
    }

    /// Whether the caller is at fault (maps to a 400-class response)
    pub fn is_client_error(&self) -> bool {
        matches!(self, DetectorError::InvalidInput(_))
    }
}
