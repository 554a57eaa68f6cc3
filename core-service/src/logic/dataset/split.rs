use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{DetectorError, DetectorResult};

/// Shuffle with a fixed seed and hold out `ceil(n * test_ratio)` items.
/// Returns `(train, test)`, both non-empty.
pub fn train_test_split<T>(mut items: Vec<T>, test_ratio: f64, seed: u64) -> DetectorResult<(Vec<T>, Vec<T>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(DetectorError::training(format!(
            "test ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }

    let n = items.len();
    let n_test = (n as f64 * test_ratio).ceil() as usize;
    if n < 2 || n_test == 0 || n_test >= n {
        return Err(DetectorError::training(format!(
            "{} rows cannot be split with test ratio {}",
            n, test_ratio
        )));
    }

    items.shuffle(&mut StdRng::seed_from_u64(seed));
    let train = items.split_off(n_test);
    Ok((train, items))
}

/// Rows per class `[class 0, class 1]`
pub fn class_counts(labels: &[usize]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &l in labels {
        if let Some(c) = counts.get_mut(l) {
            *c += 1;
        }
    }
    counts
}

/// Fail unless both classes are present
pub fn require_both_classes(labels: &[usize], what: &str) -> DetectorResult<()> {
    let counts = class_counts(labels);
    if counts.contains(&0) {
        return Err(DetectorError::training(format!(
            "{} contains a single label value (class counts {:?})",
            what, counts
        )));
    }
    Ok(())
}
