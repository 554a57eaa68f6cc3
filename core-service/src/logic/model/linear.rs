//! Logistic Regression - L2-regularized binary linear classifier
//!
//! Fit minimizes `C · Σ logloss + ½‖w‖²` (intercept unpenalized) by full-batch
//! gradient descent on `ndarray` matrices. The step size is 1/L for a
//! Frobenius-norm bound L of the gradient's Lipschitz constant, so every step
//! decreases the objective.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOGISTIC_C, DEFAULT_LOGISTIC_MAX_ITER};
use crate::error::{DetectorError, DetectorResult};
use crate::logic::features::FeatureVector;

use super::classifier::Classifier;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticConfig {
    /// Inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the largest gradient component falls below this
    pub tol: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: DEFAULT_LOGISTIC_C,
            max_iter: DEFAULT_LOGISTIC_MAX_ITER,
            tol: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub layout_hash: u32,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticModel {
    /// Fit on `x` (rows × features) with 0/1 targets `y`
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<f64>,
        layout_hash: u32,
        config: &LogisticConfig,
    ) -> DetectorResult<Self> {
        let (n, d) = x.dim();
        if n == 0 || d == 0 {
            return Err(DetectorError::training(format!(
                "logistic regression needs rows and features, got {}x{}",
                n, d
            )));
        }
        if y.len() != n {
            return Err(DetectorError::training(format!(
                "{} targets for {} rows",
                y.len(),
                n
            )));
        }
        if config.c <= 0.0 || !config.c.is_finite() {
            return Err(DetectorError::training("regularization C must be positive"));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(DetectorError::training("feature matrix contains non-finite values"));
        }

        let n_f = n as f64;
        // Objective scaled by 1/(C·n): mean logloss + ‖w‖² / (2·C·n)
        let reg = 1.0 / (config.c * n_f);
        let frob = x.iter().map(|v| v * v).sum::<f64>() / n_f;
        let lipschitz = 0.25 * (frob + 1.0) + reg;
        let step = 1.0 / lipschitz;

        let mut w = Array1::<f64>::zeros(d);
        let mut b = 0.0;
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..config.max_iter {
            iterations = iter + 1;
            let z = x.dot(&w) + b;
            let residual = z.mapv(sigmoid) - y;

            let grad_w = x.t().dot(&residual) / n_f + &w * reg;
            let grad_b = residual.sum() / n_f;

            let max_grad = grad_w
                .iter()
                .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
            if max_grad < config.tol {
                converged = true;
                break;
            }

            w.scaled_add(-step, &grad_w);
            b -= step * grad_b;
        }

        if converged {
            log::debug!("Logistic regression converged after {} iterations", iterations);
        } else {
            log::warn!(
                "Logistic regression stopped at max_iter={} without reaching tol={}",
                config.max_iter,
                config.tol
            );
        }

        Ok(Self {
            layout_hash,
            coef: w.to_vec(),
            intercept: b,
        })
    }

    /// Decision function `w·x + b`
    pub fn decision(&self, x: &FeatureVector) -> f64 {
        x.iter_nonzero()
            .map(|(i, v)| self.coef.get(i).copied().unwrap_or(0.0) * v)
            .sum::<f64>()
            + self.intercept
    }

    /// Class-1 probability of every row of `x`
    pub fn predict_matrix(&self, x: &Array2<f64>) -> Array1<f64> {
        let w = Array1::from(self.coef.clone());
        (x.dot(&w) + self.intercept).mapv(sigmoid)
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        let p1 = sigmoid(self.decision(x));
        [1.0 - p1, p1]
    }
}

/// Stack dense rows into a matrix
pub fn rows_to_matrix(rows: &[Vec<f64>], dim: usize) -> DetectorResult<Array2<f64>> {
    let mut data = Vec::with_capacity(rows.len() * dim);
    for row in rows {
        data.extend(row.iter().copied().chain(std::iter::repeat(0.0)).take(dim));
    }
    Array2::from_shape_vec((rows.len(), dim), data)
        .map_err(|e| DetectorError::training(format!("matrix shape error: {}", e)))
}
