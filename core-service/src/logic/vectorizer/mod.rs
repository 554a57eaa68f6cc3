//! Vectorizer Module - bag-of-terms encoding of email text
//!
//! Normalized text → sparse `FeatureVector` over a fitted `Vocabulary`.
//! - `vocabulary` - term columns, document frequencies, IDF
//!
//! Fitting happens once per training run. Serving only calls `transform`,
//! out-of-vocabulary terms are ignored and never grow the layout.

pub mod vocabulary;

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::DEFAULT_MAX_FEATURES;
use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::{normalize, FeatureSchema, FeatureVector};

pub use vocabulary::{RowNorm, Vocabulary, WeightScheme, EMAIL_FEATURE_VERSION};

/// Unicode word runs of two or more characters
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Split already-normalized text into terms
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    TOKEN_RE.find_iter(normalized).map(|m| m.as_str())
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorizerConfig {
    pub weighting: WeightScheme,
    pub max_features: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            weighting: WeightScheme::TfIdf,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

// ============================================================================
// VECTORIZER
// ============================================================================

#[derive(Debug, Clone)]
pub struct LexicalVectorizer {
    vocabulary: Vocabulary,
}

impl LexicalVectorizer {
    /// Wrap a previously fitted (loaded) vocabulary
    pub fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Fit a vocabulary on `corpus` and encode the corpus with it
    pub fn fit<S: AsRef<str>>(
        corpus: &[S],
        config: &VectorizerConfig,
    ) -> DetectorResult<(Self, Vec<FeatureVector>)> {
        if corpus.is_empty() {
            return Err(DetectorError::training("cannot fit vectorizer on an empty corpus"));
        }

        let normalized: Vec<String> = corpus.iter().map(|d| normalize(d.as_ref())).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &normalized {
            let unique: HashSet<&str> = tokenize(doc).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Highest document frequency first, lexical order breaks ties
        let mut ranked: Vec<(&str, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(config.max_features);

        let selected = ranked
            .into_iter()
            .map(|(t, df)| (t.to_string(), df))
            .collect();
        let vocabulary = Vocabulary::new(config.weighting, corpus.len(), selected);

        log::debug!(
            "Vectorizer fit: {} docs, {} terms ({:?})",
            vocabulary.n_docs,
            vocabulary.len(),
            vocabulary.weighting
        );

        let vectorizer = Self { vocabulary };
        let vectors = normalized
            .iter()
            .map(|doc| vectorizer.encode_normalized(doc))
            .collect();
        Ok((vectorizer, vectors))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    pub fn schema(&self) -> FeatureSchema {
        self.vocabulary.schema()
    }

    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Vec<FeatureVector> {
        texts.iter().map(|t| self.transform_one(t.as_ref())).collect()
    }

    pub fn transform_one(&self, text: &str) -> FeatureVector {
        self.encode_normalized(&normalize(text))
    }

    fn encode_normalized(&self, normalized: &str) -> FeatureVector {
        let vocab = &self.vocabulary;

        // Column order keeps the L2 sum identical between fit and serve
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(normalized) {
            if let Some(col) = vocab.column(term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts.into_iter().collect();
        if vocab.weighting == WeightScheme::TfIdf {
            for (col, value) in entries.iter_mut() {
                *value *= vocab.idf(*col).unwrap_or(1.0);
            }
        }
        if vocab.norm == RowNorm::L2 {
            let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, value) in entries.iter_mut() {
                    *value /= norm;
                }
            }
        }

        FeatureVector::sparse(
            EMAIL_FEATURE_VERSION,
            vocab.layout_hash,
            vocab.shared_terms(),
            entries,
        )
    }
}
