//! Labels - class id ↔ verdict mapping
//!
//! Which class id means "phishing" is a property of the training data, not of
//! the code. The mapping is stored inside every classifier artifact.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing,
    Legitimate,
}

impl Label {
    pub fn is_phishing(self) -> bool {
        matches!(self, Label::Phishing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Url,
    Email,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Url => "url",
            Modality::Email => "email",
        }
    }

    /// Caller-facing verdict string
    pub fn display_label(self, label: Label) -> &'static str {
        match (self, label) {
            (Modality::Url, Label::Phishing) => "Phishing",
            (Modality::Url, Label::Legitimate) => "Legitimate",
            (Modality::Email, Label::Phishing) => "Phishing email",
            (Modality::Email, Label::Legitimate) => "Safe Email",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary label convention of a trained classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMap {
    /// Class id (0 or 1) that denotes phishing
    pub phishing_class: usize,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self { phishing_class: 1 }
    }
}

impl LabelMap {
    pub fn new(phishing_class: usize) -> Self {
        Self { phishing_class }
    }

    pub fn label_for(&self, class_id: usize) -> Label {
        if class_id == self.phishing_class {
            Label::Phishing
        } else {
            Label::Legitimate
        }
    }

    pub fn class_for(&self, label: Label) -> usize {
        match label {
            Label::Phishing => self.phishing_class,
            Label::Legitimate => 1 - self.phishing_class.min(1),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.phishing_class <= 1
    }
}
