use crate::constants::{
    DEFAULT_NB_ALPHA, DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO, URL_COLUMN, URL_LABEL_COLUMN,
};
use crate::logic::model::LogisticConfig;
use crate::logic::vectorizer::VectorizerConfig;

/// Knobs of one training run (both modalities)
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub test_ratio: f64,
    pub seed: u64,
    /// URL dataset: raw URL column (numeric mode when absent)
    pub url_column: String,
    pub label_column: String,
    /// URL dataset: label value that means phishing
    pub phishing_class: usize,
    pub logistic: LogisticConfig,
    pub vectorizer: VectorizerConfig,
    pub nb_alpha: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SPLIT_SEED,
            url_column: URL_COLUMN.to_string(),
            label_column: URL_LABEL_COLUMN.to_string(),
            phishing_class: 1,
            logistic: LogisticConfig::default(),
            vectorizer: VectorizerConfig::default(),
            nb_alpha: DEFAULT_NB_ALPHA,
        }
    }
}
