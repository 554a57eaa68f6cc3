//! Email pipeline: normalizer → lexical vectorizer → multinomial naive Bayes

use std::path::Path;

use chrono::Utc;

use crate::error::{DetectorError, DetectorResult};
use crate::logic::artifacts::{ArtifactKind, ArtifactStore};
use crate::logic::dataset::{class_counts, load_email_dataset, require_both_classes, train_test_split};
use crate::logic::model::{score, ClassifierArtifact, LabelMap, Modality, ModelArtifact, NaiveBayesModel};
use crate::logic::vectorizer::{LexicalVectorizer, WeightScheme};

use super::metrics::ClassificationMetrics;
use super::{TrainingConfig, TrainingReport};

pub fn train_email(dataset_path: &Path, config: &TrainingConfig, store: &ArtifactStore) -> DetectorResult<TrainingReport> {
    // `Phishing Email` parses to 1
    let labels = LabelMap::new(1);

    log::info!("Training email model from {}", dataset_path.display());
    let rows = load_email_dataset(dataset_path)?;
    let all_labels: Vec<usize> = rows.iter().map(|r| r.label).collect();
    require_both_classes(&all_labels, "email dataset")?;

    let (train, test) = train_test_split(rows, config.test_ratio, config.seed)?;
    let train_labels: Vec<usize> = train.iter().map(|r| r.label).collect();
    require_both_classes(&train_labels, "email training split")?;

    let texts: Vec<&str> = train.iter().map(|r| r.text.as_str()).collect();
    let (vectorizer, train_vectors) = LexicalVectorizer::fit(&texts, &config.vectorizer)?;
    if vectorizer.vocabulary().is_empty() {
        return Err(DetectorError::training(
            "vocabulary is empty: no training email contains a usable term",
        ));
    }

    let schema = vectorizer.schema();
    let nb = NaiveBayesModel::fit(
        &train_vectors,
        &train_labels,
        schema.len(),
        schema.layout_hash,
        config.nb_alpha,
    )?;
    let model = ModelArtifact {
        labels,
        classifier: ClassifierArtifact::MultinomialNb(nb),
    };

    let mut pairs = Vec::with_capacity(test.len());
    for row in &test {
        let raw = vectorizer.transform_one(&row.text);
        let result = score(&raw, &schema, None, &model.classifier, &model.labels)?;
        pairs.push((result.class_id, row.label));
    }
    let metrics = ClassificationMetrics::compute(pairs, labels.phishing_class);

    let artifacts = vec![
        store.save(ArtifactKind::EmailSchema, &schema)?,
        store.save(ArtifactKind::EmailVocabulary, vectorizer.vocabulary())?,
        store.save(ArtifactKind::EmailModel, &model)?,
    ];

    let mode = match config.vectorizer.weighting {
        WeightScheme::Count => "count",
        WeightScheme::TfIdf => "tfidf",
    };
    let report = TrainingReport {
        modality: Modality::Email,
        mode: mode.to_string(),
        classifier: model.classifier.kind().to_string(),
        phishing_class: labels.phishing_class,
        n_train: train.len(),
        n_test: test.len(),
        n_features: schema.len(),
        layout_hash: format!("{:08x}", schema.layout_hash),
        class_counts: class_counts(&all_labels),
        metrics,
        artifacts,
        trained_at: Utc::now(),
    };
    store.save_report(Modality::Email.as_str(), &report)?;
    report.log_summary();
    Ok(report)
}
