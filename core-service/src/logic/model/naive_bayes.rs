//! Multinomial Naive Bayes - term-count classifier (email modality)

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NB_ALPHA;
use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::FeatureVector;

use super::classifier::Classifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    pub layout_hash: u32,
    /// Additive (Laplace/Lidstone) smoothing
    pub alpha: f64,
    /// ln P(class)
    pub class_log_prior: [f64; 2],
    /// ln P(feature | class), one row per class
    pub feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayesModel {
    /// Fit on non-negative vectors sharing one layout, `labels` in {0, 1}
    pub fn fit(
        rows: &[FeatureVector],
        labels: &[usize],
        n_features: usize,
        layout_hash: u32,
        alpha: f64,
    ) -> DetectorResult<Self> {
        if rows.is_empty() || rows.len() != labels.len() {
            return Err(DetectorError::training(format!(
                "naive Bayes needs one label per row, got {} rows and {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if alpha <= 0.0 || !alpha.is_finite() {
            return Err(DetectorError::training("smoothing alpha must be positive"));
        }

        let mut class_count = [0usize; 2];
        let mut feature_count = [vec![0.0; n_features], vec![0.0; n_features]];

        for (row, &label) in rows.iter().zip(labels) {
            if label > 1 {
                return Err(DetectorError::training(format!("label {} is not binary", label)));
            }
            class_count[label] += 1;
            for (j, v) in row.iter_nonzero() {
                if v < 0.0 || !v.is_finite() {
                    return Err(DetectorError::training(
                        "naive Bayes requires non-negative finite features",
                    ));
                }
                if let Some(slot) = feature_count[label].get_mut(j) {
                    *slot += v;
                }
            }
        }

        if class_count.contains(&0) {
            return Err(DetectorError::training(format!(
                "both classes are required, got counts {:?}",
                class_count
            )));
        }

        let n = rows.len() as f64;
        let class_log_prior = [
            (class_count[0] as f64 / n).ln(),
            (class_count[1] as f64 / n).ln(),
        ];

        let feature_log_prob = feature_count.map(|counts| {
            let total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
            let log_total = total.ln();
            counts.iter().map(|c| (c + alpha).ln() - log_total).collect::<Vec<f64>>()
        });

        Ok(Self {
            layout_hash,
            alpha,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn fit_default(
        rows: &[FeatureVector],
        labels: &[usize],
        n_features: usize,
        layout_hash: u32,
    ) -> DetectorResult<Self> {
        Self::fit(rows, labels, n_features, layout_hash, DEFAULT_NB_ALPHA)
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    /// Joint log likelihood per class
    pub fn joint_log_likelihood(&self, x: &FeatureVector) -> [f64; 2] {
        let mut jll = self.class_log_prior;
        for (j, v) in x.iter_nonzero() {
            for (c, acc) in jll.iter_mut().enumerate() {
                if let Some(lp) = self.feature_log_prob[c].get(j) {
                    *acc += v * lp;
                }
            }
        }
        jll
    }
}

impl Classifier for NaiveBayesModel {
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        let jll = self.joint_log_likelihood(x);
        let max = jll[0].max(jll[1]);
        let log_sum = max + ((jll[0] - max).exp() + (jll[1] - max).exp()).ln();
        [(jll[0] - log_sum).exp(), (jll[1] - log_sum).exp()]
    }
}
