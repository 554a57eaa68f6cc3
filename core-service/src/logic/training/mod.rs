//! Training Module - offline fitting of both modalities
//!
//! dataset → split → fit (train split only) → evaluate (held-out split)
//! → persist artifacts + report.
//!
//! Evaluation scores held-out rows through `model::score`, the same path the
//! server uses, so the reported metrics describe the artifacts as served.

pub mod config;
pub mod metrics;
pub mod url;
pub mod email;


use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logic::model::Modality;

pub use config::TrainingConfig;
pub use email::train_email;
pub use metrics::{ClassificationMetrics, ConfusionMatrix};
pub use url::train_url;

/// Outcome of one training run, also written as `<modality>_report.json`
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub modality: Modality,
    /// `raw`, `numeric` (URL) or the vectorizer weighting (email)
    pub mode: String,
    pub classifier: String,
    pub phishing_class: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub n_features: usize,
    pub layout_hash: String,
    /// Rows per class in the whole dataset
    pub class_counts: [usize; 2],
    pub metrics: ClassificationMetrics,
    pub artifacts: Vec<PathBuf>,
    pub trained_at: DateTime<Utc>,
}

impl TrainingReport {
    pub fn log_summary(&self) {
        let m = &self.metrics;
        log::info!(
            "[{}] {} on {} features: train={} test={}",
            self.modality,
            self.classifier,
            self.n_features,
            self.n_train,
            self.n_test
        );
        log::info!(
            "[{}] accuracy={:.4} precision={:.4} recall={:.4} f1={:.4}",
            self.modality,
            m.accuracy,
            m.precision,
            m.recall,
            m.f1
        );
        log::info!(
            "[{}] confusion: TP={} FP={} TN={} FN={}",
            self.modality,
            m.confusion.true_positive,
            m.confusion.false_positive,
            m.confusion.true_negative,
            m.confusion.false_negative
        );
    }
}
