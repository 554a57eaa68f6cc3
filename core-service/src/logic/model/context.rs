//! Model Context - every artifact needed to serve both modalities
//!
//! Built once (from an `ArtifactStore` or in memory) and shared read-only,
//! typically as `Arc<ModelContext>`. Construction checks that the artifacts
//! of each modality belong together.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{DetectorError, DetectorResult};
use crate::logic::artifacts::{ArtifactKind, ArtifactStore};
use crate::logic::features::{FeatureSchema, UrlFeatureExtractor};
use crate::logic::vectorizer::{LexicalVectorizer, Vocabulary};

use super::classifier::ModelArtifact;
use super::label::LabelMap;
use super::scaler::ScalerParams;

fn check_model(kind: ArtifactKind, model: &ModelArtifact, schema: &FeatureSchema) -> DetectorResult<()> {
    if !model.labels.is_valid() {
        return Err(DetectorError::artifact(
            kind.as_str(),
            format!("phishing_class {} is not 0 or 1", model.labels.phishing_class),
        ));
    }
    if model.classifier.layout_hash() != schema.layout_hash
        || model.classifier.n_features() != schema.len()
    {
        return Err(DetectorError::artifact(
            kind.as_str(),
            format!(
                "classifier layout {:08x} ({} features) does not match schema {:08x} ({} features)",
                model.classifier.layout_hash(),
                model.classifier.n_features(),
                schema.layout_hash,
                schema.len()
            ),
        ));
    }
    Ok(())
}

fn check_schema(kind: ArtifactKind, schema: &FeatureSchema) -> DetectorResult<()> {
    if schema.is_empty() || !schema.is_consistent() {
        return Err(DetectorError::artifact(
            kind.as_str(),
            "schema is empty or its layout hash does not match its names",
        ));
    }
    Ok(())
}

// ============================================================================
// URL
// ============================================================================

#[derive(Debug, Clone)]
pub struct UrlModel {
    pub schema: FeatureSchema,
    pub scaler: ScalerParams,
    pub model: ModelArtifact,
    pub extractor: UrlFeatureExtractor,
}

impl UrlModel {
    pub fn new(schema: FeatureSchema, scaler: ScalerParams, model: ModelArtifact) -> DetectorResult<Self> {
        check_schema(ArtifactKind::UrlSchema, &schema)?;
        scaler
            .check_schema(&schema)
            .map_err(|e| DetectorError::artifact(ArtifactKind::UrlScaler.as_str(), e.to_string()))?;
        check_model(ArtifactKind::UrlModel, &model, &schema)?;

        if !schema.matches_url_layout() {
            log::warn!(
                "URL schema ({} features, {:08x}) differs from extractor layout; \
                 predictions will report missing/dropped features",
                schema.len(),
                schema.layout_hash
            );
        }

        Ok(Self {
            schema,
            scaler,
            model,
            extractor: UrlFeatureExtractor::new(),
        })
    }

    pub fn load(store: &ArtifactStore) -> DetectorResult<Self> {
        Self::new(
            store.load(ArtifactKind::UrlSchema)?,
            store.load(ArtifactKind::UrlScaler)?,
            store.load(ArtifactKind::UrlModel)?,
        )
    }
}

// ============================================================================
// EMAIL
// ============================================================================

#[derive(Debug, Clone)]
pub struct EmailModel {
    pub schema: FeatureSchema,
    pub vectorizer: LexicalVectorizer,
    pub model: ModelArtifact,
}

impl EmailModel {
    pub fn new(schema: FeatureSchema, vocabulary: Vocabulary, model: ModelArtifact) -> DetectorResult<Self> {
        check_schema(ArtifactKind::EmailSchema, &schema)?;
        if !vocabulary.is_consistent()
            || vocabulary.layout_hash != schema.layout_hash
            || vocabulary.terms() != schema.names()
        {
            return Err(DetectorError::artifact(
                ArtifactKind::EmailVocabulary.as_str(),
                format!(
                    "vocabulary layout {:08x} ({} terms) does not match schema {:08x} ({} features)",
                    vocabulary.layout_hash,
                    vocabulary.len(),
                    schema.layout_hash,
                    schema.len()
                ),
            ));
        }
        check_model(ArtifactKind::EmailModel, &model, &schema)?;

        Ok(Self {
            schema,
            vectorizer: LexicalVectorizer::from_vocabulary(vocabulary),
            model,
        })
    }

    pub fn load(store: &ArtifactStore) -> DetectorResult<Self> {
        Self::new(
            store.load(ArtifactKind::EmailSchema)?,
            store.load(ArtifactKind::EmailVocabulary)?,
            store.load(ArtifactKind::EmailModel)?,
        )
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

#[derive(Debug, Clone)]
pub struct ModelContext {
    pub url: UrlModel,
    pub email: EmailModel,
    pub loaded_at: DateTime<Utc>,
}

impl ModelContext {
    pub fn new(url: UrlModel, email: EmailModel) -> Self {
        Self {
            url,
            email,
            loaded_at: Utc::now(),
        }
    }

    /// Load and cross-check all six artifacts
    pub fn load(store: &ArtifactStore) -> DetectorResult<Self> {
        log::info!("Loading model artifacts from {}", store.root().display());
        let ctx = Self::new(UrlModel::load(store)?, EmailModel::load(store)?);
        log::info!(
            "Models ready: url {} features ({}), email {} terms ({})",
            ctx.url.schema.len(),
            ctx.url.model.classifier.kind(),
            ctx.email.schema.len(),
            ctx.email.model.classifier.kind()
        );
        Ok(ctx)
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            url: ModalityInfo {
                schema_version: self.url.schema.version,
                layout_hash: format!("{:08x}", self.url.schema.layout_hash),
                feature_count: self.url.schema.len(),
                classifier: self.url.model.classifier.kind(),
                labels: self.url.model.labels,
            },
            email: ModalityInfo {
                schema_version: self.email.schema.version,
                layout_hash: format!("{:08x}", self.email.schema.layout_hash),
                feature_count: self.email.schema.len(),
                classifier: self.email.model.classifier.kind(),
                labels: self.email.model.labels,
            },
            loaded_at: self.loaded_at,
        }
    }
}

/// Serializable summary of a loaded context
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub url: ModalityInfo,
    pub email: ModalityInfo,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModalityInfo {
    pub schema_version: u8,
    pub layout_hash: String,
    pub feature_count: usize,
    pub classifier: &'static str,
    pub labels: LabelMap,
}
