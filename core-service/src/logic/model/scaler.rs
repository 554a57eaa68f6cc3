//! Standard Scaler - per-feature mean / std standardization (URL modality)

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::{FeatureSchema, FeatureVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Layout hash of the schema the statistics were computed on
    pub layout_hash: u32,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl ScalerParams {
    /// Population mean and std over `rows` (each in schema order)
    pub fn fit(schema: &FeatureSchema, rows: &[Vec<f64>]) -> DetectorResult<Self> {
        let dim = schema.len();
        if rows.is_empty() {
            return Err(DetectorError::training("cannot fit scaler on zero rows"));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != dim) {
            return Err(DetectorError::training(format!(
                "row {} has {} features, schema has {}",
                bad,
                rows[bad].len(),
                dim
            )));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; dim];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; dim];
        for row in rows {
            for ((acc, v), m) in var.iter_mut().zip(row).zip(&mean) {
                *acc += (v - m).powi(2);
            }
        }
        let std = var.into_iter().map(|v| (v / n).sqrt()).collect();

        Ok(Self {
            layout_hash: schema.layout_hash,
            mean,
            std,
        })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Scaler belongs to `schema`
    pub fn check_schema(&self, schema: &FeatureSchema) -> DetectorResult<()> {
        if self.layout_hash != schema.layout_hash
            || self.len() != schema.len()
            || self.std.len() != self.mean.len()
        {
            return Err(DetectorError::SchemaMismatch(format!(
                "scaler fit on layout {:08x} ({} features), schema is {:08x} ({} features)",
                self.layout_hash,
                self.len(),
                schema.layout_hash,
                schema.len()
            )));
        }
        Ok(())
    }

    /// `(x - mean) / std`; a zero or non-finite std only centers
    pub fn scale_value(&self, index: usize, x: f64) -> f64 {
        let mean = self.mean.get(index).copied().unwrap_or(0.0);
        let std = self.std.get(index).copied().unwrap_or(1.0);
        if std == 0.0 || !std.is_finite() {
            x - mean
        } else {
            (x - mean) / std
        }
    }

    pub fn scale_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(i, &x)| self.scale_value(i, x))
            .collect()
    }

    /// Standardize an already reconciled vector (result is dense)
    pub fn transform(&self, vector: &FeatureVector) -> DetectorResult<FeatureVector> {
        if vector.layout_hash != self.layout_hash || vector.len() != self.len() {
            return Err(DetectorError::SchemaMismatch(format!(
                "vector layout {:08x} ({} features) does not match scaler {:08x} ({} features)",
                vector.layout_hash,
                vector.len(),
                self.layout_hash,
                self.len()
            )));
        }
        Ok(FeatureVector::dense(
            vector.version,
            vector.layout_hash,
            vector.shared_names(),
            self.scale_row(&vector.to_dense()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(1, vec!["a".into(), "b".into()])
    }

    #[test]
    fn test_fit_population_std() {
        let rows = vec![vec![1.0, 5.0], vec![3.0, 5.0]];
        let scaler = ScalerParams::fit(&schema(), &rows).unwrap();
        assert_eq!(scaler.mean, vec![2.0, 5.0]);
        assert_eq!(scaler.std, vec![1.0, 0.0]);
        assert_eq!(scaler.layout_hash, schema().layout_hash);
    }

    #[test]
    fn test_zero_std_only_centers() {
        let scaler = ScalerParams {
            layout_hash: 0,
            mean: vec![2.0, 5.0],
            std: vec![1.0, 0.0],
        };
        assert_eq!(scaler.scale_row(&[4.0, 7.0]), vec![2.0, 2.0]);
        for v in scaler.scale_row(&[f64::MAX, 0.0]) {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_fit_rejects_empty_and_ragged() {
        assert!(ScalerParams::fit(&schema(), &[]).is_err());
        assert!(ScalerParams::fit(&schema(), &[vec![1.0]]).is_err());
    }

    #[test]
    fn test_transform_checks_layout() {
        let s = schema();
        let scaler = ScalerParams::fit(&s, &[vec![0.0, 0.0], vec![2.0, 2.0]]).unwrap();
        assert!(scaler.check_schema(&s).is_ok());

        let v = FeatureVector::dense(1, s.layout_hash, s.shared_names(), vec![2.0, 0.0]);
        assert_eq!(scaler.transform(&v).unwrap().to_dense(), vec![1.0, -1.0]);

        let other = FeatureSchema::new(1, vec!["x".into(), "y".into()]);
        assert!(matches!(
            scaler.check_schema(&other),
            Err(DetectorError::SchemaMismatch(_))
        ));
    }
}
