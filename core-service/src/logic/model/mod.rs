//! Model Module - classifiers, scaling and inference
//!
//! Trained artifacts in, verdicts out.
//! Loading lives in `context`, scoring in `inference`.

pub mod label;
pub mod classifier;
pub mod linear;
pub mod naive_bayes;
pub mod scaler;
pub mod inference;
pub mod context;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export common types
pub use classifier::{Classifier, ClassifierArtifact, ModelArtifact};
pub use context::{EmailModel, ModelContext, ModelInfo, UrlModel};
pub use inference::{score, score_email, score_url, score_url_features, PredictionResult};
pub use label::{Label, LabelMap, Modality};
pub use linear::{LogisticConfig, LogisticModel};
pub use naive_bayes::NaiveBayesModel;
pub use scaler::ScalerParams;
