//! Held-out evaluation metrics (phishing = positive class)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// Tally `(predicted, actual)` class ids against `positive`
    pub fn from_pairs<I>(pairs: I, positive: usize) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut m = Self::default();
        for (predicted, actual) in pairs {
            match (predicted == positive, actual == positive) {
                (true, true) => m.true_positive += 1,
                (true, false) => m.false_positive += 1,
                (false, false) => m.true_negative += 1,
                (false, true) => m.false_negative += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

fn safe_div(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationMetrics {
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let c = &confusion;
        let accuracy = safe_div(c.true_positive + c.true_negative, c.total());
        let precision = safe_div(c.true_positive, c.true_positive + c.false_positive);
        let recall = safe_div(c.true_positive, c.true_positive + c.false_negative);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            accuracy,
            precision,
            recall,
            f1,
            confusion,
        }
    }

    pub fn compute<I>(pairs: I, positive: usize) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self::from_confusion(ConfusionMatrix::from_pairs(pairs, positive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_values() {
        // (predicted, actual) with positive = 1: TP=2 FP=1 TN=1 FN=1
        let pairs = vec![(1, 1), (1, 1), (1, 0), (0, 0), (0, 1)];
        let m = ClassificationMetrics::compute(pairs, 1);
        assert_eq!(m.confusion.true_positive, 2);
        assert_eq!(m.confusion.false_negative, 1);
        assert!((m.accuracy - 0.6).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_positive_class_zero() {
        let m = ClassificationMetrics::compute(vec![(0, 0), (1, 1)], 0);
        assert_eq!(m.confusion.true_positive, 1);
        assert_eq!(m.confusion.true_negative, 1);
        assert_eq!(m.f1, 1.0);
    }

    #[test]
    fn test_no_positive_predictions() {
        let m = ClassificationMetrics::compute(vec![(0, 1), (0, 0)], 1);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.f1, 0.0);
        assert_eq!(m.accuracy, 0.5);
    }
}
