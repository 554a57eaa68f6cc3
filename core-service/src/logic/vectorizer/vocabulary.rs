//! Vocabulary - fitted term → column mapping with IDF weights
//!
//! Columns follow the lexical order of the selected terms, so a vocabulary
//! fit twice on the same corpus assigns identical columns.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::compute_layout_hash;
use crate::logic::features::FeatureSchema;

/// Layout version of email term vectors
pub const EMAIL_FEATURE_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightScheme {
    /// Raw term counts
    Count,
    /// Term count × smoothed IDF
    #[default]
    TfIdf,
}

impl std::str::FromStr for WeightScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(WeightScheme::Count),
            "tfidf" | "tf-idf" => Ok(WeightScheme::TfIdf),
            other => Err(format!("unknown weight scheme '{}', expected count|tfidf", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowNorm {
    None,
    L2,
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`
pub fn smooth_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "VocabularyRepr", into = "VocabularyRepr")]
pub struct Vocabulary {
    pub weighting: WeightScheme,
    pub norm: RowNorm,
    /// Documents seen during fit
    pub n_docs: usize,
    pub layout_hash: u32,
    terms: Arc<[String]>,
    doc_freq: Vec<usize>,
    idf: Vec<f64>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct VocabularyRepr {
    weighting: WeightScheme,
    norm: RowNorm,
    n_docs: usize,
    layout_hash: u32,
    terms: Vec<String>,
    doc_freq: Vec<usize>,
    idf: Vec<f64>,
}

impl From<VocabularyRepr> for Vocabulary {
    fn from(repr: VocabularyRepr) -> Self {
        let index = build_index(&repr.terms);
        Self {
            weighting: repr.weighting,
            norm: repr.norm,
            n_docs: repr.n_docs,
            layout_hash: repr.layout_hash,
            terms: repr.terms.into(),
            doc_freq: repr.doc_freq,
            idf: repr.idf,
            index,
        }
    }
}

impl From<Vocabulary> for VocabularyRepr {
    fn from(vocab: Vocabulary) -> Self {
        Self {
            weighting: vocab.weighting,
            norm: vocab.norm,
            n_docs: vocab.n_docs,
            layout_hash: vocab.layout_hash,
            terms: vocab.terms.to_vec(),
            doc_freq: vocab.doc_freq,
            idf: vocab.idf,
        }
    }
}

fn build_index(terms: &[String]) -> HashMap<String, usize> {
    terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.clone(), i))
        .collect()
}

impl Vocabulary {
    /// Build from `(term, document frequency)` pairs. Terms are re-sorted
    /// lexically to fix their columns.
    pub fn new(
        weighting: WeightScheme,
        n_docs: usize,
        mut selected: Vec<(String, usize)>,
    ) -> Self {
        selected.sort_by(|a, b| a.0.cmp(&b.0));

        let terms: Vec<String> = selected.iter().map(|(t, _)| t.clone()).collect();
        let doc_freq: Vec<usize> = selected.iter().map(|(_, df)| *df).collect();
        let idf = doc_freq.iter().map(|&df| smooth_idf(n_docs, df)).collect();
        let norm = match weighting {
            WeightScheme::Count => RowNorm::None,
            WeightScheme::TfIdf => RowNorm::L2,
        };

        Self {
            weighting,
            norm,
            n_docs,
            layout_hash: compute_layout_hash(EMAIL_FEATURE_VERSION, terms.as_slice()),
            index: build_index(&terms),
            terms: terms.into(),
            doc_freq,
            idf,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn shared_terms(&self) -> Arc<[String]> {
        Arc::clone(&self.terms)
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn idf(&self, column: usize) -> Option<f64> {
        self.idf.get(column).copied()
    }

    pub fn doc_freq(&self, column: usize) -> Option<usize> {
        self.doc_freq.get(column).copied()
    }

    /// Input contract of the email classifier
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(EMAIL_FEATURE_VERSION, self.terms.to_vec())
    }

    /// Stored hash, column count and weights agree with each other
    pub fn is_consistent(&self) -> bool {
        self.layout_hash == compute_layout_hash(EMAIL_FEATURE_VERSION, self.terms())
            && self.doc_freq.len() == self.terms.len()
            && self.idf.len() == self.terms.len()
    }
}
