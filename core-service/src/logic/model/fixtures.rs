//! Small hand-built models shared by unit tests

use super::*;
use crate::logic::features::{FeatureSchema, URL_FEATURE_COUNT};
use crate::logic::vectorizer::{LexicalVectorizer, VectorizerConfig};

/// Hand-built URL model over the full extractor layout, keyed on keyword count
pub fn url_model() -> UrlModel {
    let schema = FeatureSchema::url_layout();
    let mut coef = vec![0.0; URL_FEATURE_COUNT];
    coef[19] = 3.0; // SuspiciousKeywordCount
    let scaler = ScalerParams {
        layout_hash: schema.layout_hash,
        mean: vec![0.0; URL_FEATURE_COUNT],
        std: vec![1.0; URL_FEATURE_COUNT],
    };
    let model = ModelArtifact {
        labels: LabelMap::default(),
        classifier: ClassifierArtifact::Linear(LogisticModel {
            layout_hash: schema.layout_hash,
            coef,
            intercept: -4.0,
        }),
    };
    UrlModel::new(schema, scaler, model).unwrap()
}

pub fn email_model() -> EmailModel {
    let corpus = [
        "verify your account password now",
        "urgent verify bank login",
        "meeting notes for tomorrow",
        "lunch plans for the team",
    ];
    let (vectorizer, rows) = LexicalVectorizer::fit(&corpus, &VectorizerConfig::default()).unwrap();
    let vocab = vectorizer.into_vocabulary();
    let nb = NaiveBayesModel::fit_default(&rows, &[1, 1, 0, 0], vocab.len(), vocab.layout_hash).unwrap();
    let model = ModelArtifact {
        labels: LabelMap::default(),
        classifier: ClassifierArtifact::MultinomialNb(nb),
    };
    EmailModel::new(vocab.schema(), vocab, model).unwrap()
}

pub fn context() -> ModelContext {
    ModelContext::new(url_model(), email_model())
}
