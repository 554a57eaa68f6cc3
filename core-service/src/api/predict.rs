//! Prediction requests and responses
//!
//! Validation and response shaping shared by every front end (CLI, HTTP).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::{FeatureVector, SchemaDiagnostics};
use crate::logic::model::{score_email, score_url, score_url_features, Modality, ModelContext, PredictionResult};
use crate::logic::prediction_log::PredictionLogEntry;

// ============================================================================
// REQUESTS
// ============================================================================

/// `{"url": "..."}` or `{"features": {"URLLength": 31, ...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlPredictRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub features: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailPredictRequest {
    #[serde(default)]
    pub email_text: Option<String>,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub probability: f64,
    pub schema: SchemaDiagnostics,
}

/// A scored request, ready to be answered and logged
#[derive(Debug, Clone)]
pub struct Prediction {
    pub modality: Modality,
    /// What gets logged as the request input
    pub input: String,
    pub result: PredictionResult,
}

impl Prediction {
    pub fn response(&self) -> PredictResponse {
        PredictResponse {
            prediction: self.modality.display_label(self.result.label).to_string(),
            probability: self.result.probability,
            schema: self.result.diagnostics.clone(),
        }
    }

    pub fn log_entry(&self) -> PredictionLogEntry {
        PredictionLogEntry::new(self.modality, &self.input, &self.result)
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

pub fn predict_url(ctx: &ModelContext, request: &UrlPredictRequest) -> DetectorResult<Prediction> {
    let (result, input) = match (&request.url, &request.features) {
        (Some(_), Some(_)) => {
            return Err(DetectorError::invalid_input(
                "provide either 'url' or 'features', not both",
            ))
        }
        (Some(url), None) => (score_url(ctx, url)?, url.clone()),
        (None, Some(features)) => {
            if features.is_empty() {
                return Err(DetectorError::invalid_input("'features' must not be empty"));
            }
            let raw = FeatureVector::from_named(features.iter().map(|(k, v)| (k.as_str(), *v)));
            let input = serde_json::to_string(features)?;
            (score_url_features(ctx, &raw)?, input)
        }
        (None, None) => return Err(DetectorError::invalid_input("'url' is required")),
    };

    Ok(Prediction {
        modality: Modality::Url,
        input,
        result,
    })
}

pub fn predict_email(ctx: &ModelContext, request: &EmailPredictRequest) -> DetectorResult<Prediction> {
    let text = request
        .email_text
        .as_deref()
        .ok_or_else(|| DetectorError::invalid_input("'email_text' is required"))?;
    let result = score_email(ctx, text)?;
    Ok(Prediction {
        modality: Modality::Email,
        input: text.to_string(),
        result,
    })
}
