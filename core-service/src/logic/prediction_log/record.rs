use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::model::{Modality, PredictionResult};

/// Input text longer than this is truncated in the log
pub const MAX_LOGGED_INPUT_CHARS: usize = 2048;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub modality: Modality,

    // Request
    pub input: String,

    // Verdict
    pub prediction: String,
    pub probability: f64,
    pub class_id: usize,

    // Schema drift seen while scoring
    pub missing_features: Vec<String>,
    pub dropped_features: Vec<String>,
}

impl PredictionLogEntry {
    pub fn new(modality: Modality, input: &str, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            modality,
            input: input.chars().take(MAX_LOGGED_INPUT_CHARS).collect(),
            prediction: modality.display_label(result.label).to_string(),
            probability: result.probability,
            class_id: result.class_id,
            missing_features: result.diagnostics.missing.clone(),
            dropped_features: result.diagnostics.dropped.clone(),
        }
    }
}
