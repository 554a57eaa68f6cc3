//! URL pipeline: features → standard scaler → logistic regression

use std::path::Path;

use chrono::Utc;

use crate::error::{DetectorError, DetectorResult};
use crate::logic::artifacts::{ArtifactKind, ArtifactStore};
use crate::logic::dataset::{class_counts, load_url_dataset, require_both_classes, train_test_split, UrlDataset};
use crate::logic::features::{FeatureSchema, FeatureVector, UrlFeatureExtractor};
use crate::logic::model::linear::rows_to_matrix;
use crate::logic::model::{score, ClassifierArtifact, LabelMap, LogisticModel, Modality, ModelArtifact, ScalerParams};

use super::metrics::ClassificationMetrics;
use super::{TrainingConfig, TrainingReport};

/// Version byte of schemas taken from dataset columns
const DATASET_SCHEMA_VERSION: u8 = 0;

/// Schema plus `(features in schema order, label)` per row
fn featurize(dataset: UrlDataset) -> (FeatureSchema, &'static str, Vec<(Vec<f64>, usize)>) {
    match dataset {
        UrlDataset::Raw(rows) => {
            let extractor = UrlFeatureExtractor::new();
            let samples = rows
                .into_iter()
                .map(|r| (extractor.extract(&r.text).to_dense(), r.label))
                .collect();
            (FeatureSchema::url_layout(), "raw", samples)
        }
        UrlDataset::Numeric(table) => {
            let schema = FeatureSchema::new(DATASET_SCHEMA_VERSION, table.feature_names);
            let samples = table.rows.into_iter().zip(table.labels).collect();
            (schema, "numeric", samples)
        }
    }
}

pub fn train_url(dataset_path: &Path, config: &TrainingConfig, store: &ArtifactStore) -> DetectorResult<TrainingReport> {
    let labels = LabelMap::new(config.phishing_class);
    if !labels.is_valid() {
        return Err(DetectorError::training(format!(
            "phishing class must be 0 or 1, got {}",
            config.phishing_class
        )));
    }

    log::info!("Training URL model from {}", dataset_path.display());
    let dataset = load_url_dataset(dataset_path, &config.url_column, &config.label_column)?;
    let all_labels = dataset.labels();
    require_both_classes(&all_labels, "URL dataset")?;

    let (schema, mode, samples) = featurize(dataset);
    if schema.is_empty() {
        return Err(DetectorError::training("URL dataset yields no features"));
    }

    let (train, test) = train_test_split(samples, config.test_ratio, config.seed)?;
    let train_labels: Vec<usize> = train.iter().map(|(_, l)| *l).collect();
    require_both_classes(&train_labels, "URL training split")?;

    // Fit scaler and classifier on the training split only
    let train_rows: Vec<Vec<f64>> = train.into_iter().map(|(row, _)| row).collect();
    let scaler = ScalerParams::fit(&schema, &train_rows)?;
    let scaled: Vec<Vec<f64>> = train_rows.iter().map(|r| scaler.scale_row(r)).collect();

    let x = rows_to_matrix(&scaled, schema.len())?;
    let y = ndarray::Array1::from(train_labels.iter().map(|&l| l as f64).collect::<Vec<_>>());
    let logistic = LogisticModel::fit(&x, &y, schema.layout_hash, &config.logistic)?;

    let model = ModelArtifact {
        labels,
        classifier: ClassifierArtifact::Linear(logistic),
    };

    // Held-out evaluation through the serving path
    let mut pairs = Vec::with_capacity(test.len());
    for (row, actual) in &test {
        let raw = FeatureVector::dense(schema.version, schema.layout_hash, schema.shared_names(), row.clone());
        let result = score(&raw, &schema, Some(&scaler), &model.classifier, &model.labels)?;
        pairs.push((result.class_id, *actual));
    }
    let metrics = ClassificationMetrics::compute(pairs, labels.phishing_class);

    let artifacts = vec![
        store.save(ArtifactKind::UrlSchema, &schema)?,
        store.save(ArtifactKind::UrlScaler, &scaler)?,
        store.save(ArtifactKind::UrlModel, &model)?,
    ];

    let report = TrainingReport {
        modality: Modality::Url,
        mode: mode.to_string(),
        classifier: model.classifier.kind().to_string(),
        phishing_class: labels.phishing_class,
        n_train: train_rows.len(),
        n_test: test.len(),
        n_features: schema.len(),
        layout_hash: format!("{:08x}", schema.layout_hash),
        class_counts: class_counts(&all_labels),
        metrics,
        artifacts,
        trained_at: Utc::now(),
    };
    store.save_report(Modality::Url.as_str(), &report)?;
    report.log_summary();
    Ok(report)
}
