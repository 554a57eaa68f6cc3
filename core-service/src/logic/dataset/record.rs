use serde::{Deserialize, Serialize};

/// One labeled text sample (a URL or an email body)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledText {
    /// Line in the source file (header is line 1)
    pub line: usize,
    pub text: String,
    /// Binary class id as found in the data
    pub label: usize,
}

/// Precomputed numeric feature table
#[derive(Debug, Clone, PartialEq)]
pub struct NumericDataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

impl NumericDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// URL training data, raw or already featurized
#[derive(Debug, Clone, PartialEq)]
pub enum UrlDataset {
    /// `URL` column + label: features come from the extractor
    Raw(Vec<LabeledText>),
    /// Every numeric column is a feature
    Numeric(NumericDataset),
}

impl UrlDataset {
    pub fn len(&self) -> usize {
        match self {
            UrlDataset::Raw(rows) => rows.len(),
            UrlDataset::Numeric(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn labels(&self) -> Vec<usize> {
        match self {
            UrlDataset::Raw(rows) => rows.iter().map(|r| r.label).collect(),
            UrlDataset::Numeric(table) => table.labels.clone(),
        }
    }
}
