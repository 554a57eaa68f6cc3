//! Classifier trait + persisted classifier artifact

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

use super::label::LabelMap;
use super::linear::LogisticModel;
use super::naive_bayes::NaiveBayesModel;

/// Binary classifier over a reconciled (and, for URLs, scaled) vector
pub trait Classifier {
    /// `[P(class 0), P(class 1)]`
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2];

    /// Argmax of `predict_proba`, ties go to class 0
    fn predict(&self, x: &FeatureVector) -> usize {
        let p = self.predict_proba(x);
        if p[1] > p[0] {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear(LogisticModel),
    MultinomialNb(NaiveBayesModel),
}

impl ClassifierArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierArtifact::Linear(_) => "logistic_regression",
            ClassifierArtifact::MultinomialNb(_) => "multinomial_nb",
        }
    }

    pub fn layout_hash(&self) -> u32 {
        match self {
            ClassifierArtifact::Linear(m) => m.layout_hash,
            ClassifierArtifact::MultinomialNb(m) => m.layout_hash,
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::Linear(m) => m.coef.len(),
            ClassifierArtifact::MultinomialNb(m) => m.n_features(),
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        match self {
            ClassifierArtifact::Linear(m) => m.predict_proba(x),
            ClassifierArtifact::MultinomialNb(m) => m.predict_proba(x),
        }
    }
}

/// What `{modality}_model.json` holds: the classifier and its label convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub labels: LabelMap,
    pub classifier: ClassifierArtifact,
}

impl Classifier for ModelArtifact {
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        self.classifier.predict_proba(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fixed([f64; 2]);

    impl Classifier for Fixed {
        fn predict_proba(&self, _x: &FeatureVector) -> [f64; 2] {
            self.0
        }
    }

    fn empty() -> FeatureVector {
        let names: Arc<[String]> = Vec::<String>::new().into();
        FeatureVector::dense(0, 0, names, vec![])
    }

    #[test]
    fn test_default_predict_is_argmax() {
        assert_eq!(Fixed([0.9, 0.1]).predict(&empty()), 0);
        assert_eq!(Fixed([0.2, 0.8]).predict(&empty()), 1);
        assert_eq!(Fixed([0.5, 0.5]).predict(&empty()), 0);
    }

    #[test]
    fn test_artifact_serde_tagged() {
        let artifact = ModelArtifact {
            labels: LabelMap::new(0),
            classifier: ClassifierArtifact::Linear(LogisticModel {
                layout_hash: 42,
                coef: vec![1.0, -2.0],
                intercept: 0.5,
            }),
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["classifier"]["type"], "linear");
        assert_eq!(json["labels"]["phishing_class"], 0);

        let back: ModelArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(back, artifact);
        assert_eq!(back.classifier.layout_hash(), 42);
        assert_eq!(back.classifier.n_features(), 2);
        assert_eq!(back.classifier.kind(), "logistic_regression");
    }
}
