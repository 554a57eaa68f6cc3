//! Inference Engine - schema → scaler → classifier → verdict
//!
//! Pure scoring over already-loaded artifacts. No global model state: every
//! call receives the artifacts it needs (or a `ModelContext`).

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::{reconcile, FeatureSchema, FeatureVector, SchemaDiagnostics};

use super::classifier::Classifier;
use super::context::ModelContext;
use super::label::{Label, LabelMap};
use super::scaler::ScalerParams;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Raw class id chosen by the classifier
    pub class_id: usize,
    /// Probability of the predicted class
    pub probability: f64,
    pub diagnostics: SchemaDiagnostics,
    pub inference_time_us: u64,
}

impl PredictionResult {
    pub fn is_phishing(&self) -> bool {
        self.label.is_phishing()
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Score a raw vector against one modality's artifacts
pub fn score<C: Classifier + ?Sized>(
    raw: &FeatureVector,
    schema: &FeatureSchema,
    scaler: Option<&ScalerParams>,
    classifier: &C,
    labels: &LabelMap,
) -> DetectorResult<PredictionResult> {
    let start_time = Instant::now();

    if let Some(scaler) = scaler {
        scaler.check_schema(schema)?;
    }

    let (aligned, diagnostics) = reconcile(raw, schema);
    let input = match scaler {
        Some(scaler) => scaler.transform(&aligned)?,
        None => aligned,
    };
    if let Some((col, value)) = input.iter_nonzero().find(|(_, v)| !v.is_finite()) {
        let name = input.names().get(col).map(String::as_str).unwrap_or("?");
        return Err(DetectorError::invalid_input(format!(
            "feature '{}' is out of range after scaling ({})",
            name, value
        )));
    }

    let proba = classifier.predict_proba(&input);
    if proba.iter().any(|p| !p.is_finite()) {
        return Err(DetectorError::invalid_input(
            "feature values are too large to score",
        ));
    }
    let class_id = classifier.predict(&input);
    let probability = proba.get(class_id).copied().unwrap_or(0.0).clamp(0.0, 1.0);

    Ok(PredictionResult {
        label: labels.label_for(class_id),
        class_id,
        probability,
        diagnostics,
        inference_time_us: start_time.elapsed().as_micros() as u64,
    })
}

fn require_text<'a>(value: &'a str, what: &str) -> DetectorResult<&'a str> {
    if value.trim().is_empty() {
        return Err(DetectorError::invalid_input(format!("{} must not be empty", what)));
    }
    Ok(value)
}

/// Extract, reconcile, scale and classify a raw URL
pub fn score_url(ctx: &ModelContext, url: &str) -> DetectorResult<PredictionResult> {
    let url = require_text(url, "url")?;
    let raw = ctx.url.extractor.extract(url);
    score_url_features(ctx, &raw)
}

/// Score a precomputed URL feature vector (named, any order)
pub fn score_url_features(ctx: &ModelContext, raw: &FeatureVector) -> DetectorResult<PredictionResult> {
    let model = &ctx.url;
    let result = score(
        raw,
        &model.schema,
        Some(&model.scaler),
        &model.model.classifier,
        &model.model.labels,
    )?;
    log::debug!(
        "URL scored {:?} p={:.3} in {}us",
        result.label,
        result.probability,
        result.inference_time_us
    );
    Ok(result)
}

/// Normalize, vectorize and classify an email body
pub fn score_email(ctx: &ModelContext, text: &str) -> DetectorResult<PredictionResult> {
    let text = require_text(text, "email_text")?;
    let model = &ctx.email;
    let raw = model.vectorizer.transform_one(text);
    let result = score(
        &raw,
        &model.schema,
        None,
        &model.model.classifier,
        &model.model.labels,
    )?;
    log::debug!(
        "Email scored {:?} p={:.3} in {}us",
        result.label,
        result.probability,
        result.inference_time_us
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::UrlFeatureExtractor;
    use crate::logic::model::LogisticModel;

    struct Fixed([f64; 2]);

    impl Classifier for Fixed {
        fn predict_proba(&self, _x: &FeatureVector) -> [f64; 2] {
            self.0
        }
    }

    /// Class 1 with 0.8 whenever the scaled URLLength says raw length > 25
    struct LongUrl;

    impl Classifier for LongUrl {
        fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
            // (25 - mean 20) / std 5
            if x.get_by_name("URLLength").unwrap_or(0.0) > 1.0 {
                [0.2, 0.8]
            } else {
                [0.8, 0.2]
            }
        }
    }

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(1, names.iter().map(|s| s.to_string()).collect())
    }

    fn e2e_parts() -> (FeatureSchema, ScalerParams) {
        let s = schema(&["URLLength", "IsHTTPS", "IsDomainIP"]);
        let scaler = ScalerParams {
            layout_hash: s.layout_hash,
            mean: vec![20.0, 0.0, 0.0],
            std: vec![5.0, 1.0, 1.0],
        };
        (s, scaler)
    }

    #[test]
    fn test_probability_of_predicted_class() {
        let s = schema(&["a"]);
        let raw = FeatureVector::from_named(vec![("a", 1.0)]);
        let r = score(&raw, &s, None, &Fixed([0.9, 0.1]), &LabelMap::default()).unwrap();
        assert_eq!(r.class_id, 0);
        assert!((r.probability - 0.9).abs() < 1e-12);
        assert_eq!(r.label, Label::Legitimate);
    }

    #[test]
    fn test_end_to_end_shipped_convention() {
        let (s, scaler) = e2e_parts();
        let raw = UrlFeatureExtractor::new()
            .extract("https://secure-login-bank-verify.example.com/account");

        let r = score(&raw, &s, Some(&scaler), &LongUrl, &LabelMap::new(1)).unwrap();
        assert_eq!(r.label, Label::Phishing);
        assert!((r.probability - 0.8).abs() < 1e-12);
        assert_eq!(r.diagnostics.dropped_count(), 20);
        assert!(r.diagnostics.missing.is_empty());
    }

    #[test]
    fn test_end_to_end_reversed_convention() {
        let (s, scaler) = e2e_parts();
        let raw = UrlFeatureExtractor::new()
            .extract("https://secure-login-bank-verify.example.com/account");

        let r = score(&raw, &s, Some(&scaler), &LongUrl, &LabelMap::new(0)).unwrap();
        assert_eq!(r.label, Label::Legitimate);
        assert!((r.probability - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_scaler_schema_mismatch_is_error() {
        let (s, mut scaler) = e2e_parts();
        scaler.layout_hash ^= 1;
        let raw = FeatureVector::from_named(vec![("URLLength", 30.0)]);
        let err = score(&raw, &s, Some(&scaler), &LongUrl, &LabelMap::default()).unwrap_err();
        assert!(matches!(err, DetectorError::SchemaMismatch(_)));
    }

    /// Opposing weights on two features, like a fitted logistic model
    fn opposed_linear(s: &FeatureSchema, weight: f64) -> LogisticModel {
        LogisticModel {
            layout_hash: s.layout_hash,
            coef: vec![weight, -weight],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_overflowing_features_rejected() {
        let s = schema(&["LetterRatio", "DigitRatio"]);
        let scaler = ScalerParams {
            layout_hash: s.layout_hash,
            mean: vec![0.5, 0.1],
            std: vec![0.1, 0.1],
        };
        let raw = FeatureVector::from_named(vec![("LetterRatio", 1e308), ("DigitRatio", 1e308)]);

        let err = score(&raw, &s, Some(&scaler), &opposed_linear(&s, 1.0), &LabelMap::default()).unwrap_err();
        assert!(matches!(err, DetectorError::InvalidInput(_)));

        // Finite after scaling, but the decision value overflows to inf - inf
        let unit = ScalerParams {
            layout_hash: s.layout_hash,
            mean: vec![0.0, 0.0],
            std: vec![1.0, 1.0],
        };
        let err = score(&raw, &s, Some(&unit), &opposed_linear(&s, 10.0), &LabelMap::default()).unwrap_err();
        assert!(matches!(err, DetectorError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_probabilities_rejected() {
        let s = schema(&["a"]);
        let raw = FeatureVector::from_named(vec![("a", 1.0)]);
        let err = score(&raw, &s, None, &Fixed([f64::NAN, f64::NAN]), &LabelMap::default()).unwrap_err();
        assert!(matches!(err, DetectorError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(matches!(
            require_text("   \n", "url"),
            Err(DetectorError::InvalidInput(_))
        ));
        assert_eq!(require_text(" x ", "url").unwrap(), " x ");
    }
}
