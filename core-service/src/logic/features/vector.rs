//! Feature Vector - Core data structure for ML input
//!
//! **Versioned, ordered, named feature vector**
//!
//! Every vector carries:
//! - the layout version and CRC32 hash of the names that produced it
//! - a shared name list (cheap to clone, one allocation per layout)
//! - values, dense or sparse (absent sparse entries read as 0.0)
//!
//! Never pass raw `Vec<f64>` between pipeline stages: two vectors are only
//! comparable if their name sequences are identical, and only this type knows
//! its names.

use std::collections::HashMap;
use std::sync::Arc;

use super::layout::compute_layout_hash;

// ============================================================================
// VALUES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValues {
    /// One value per name, in name order
    Dense(Vec<f64>),
    /// `(index, value)` pairs sorted by index, no duplicates
    Sparse(Vec<(usize, f64)>),
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    names: Arc<[String]>,
    values: FeatureValues,
}

impl FeatureVector {
    /// Dense vector over `names`. Values are padded with zeros or truncated
    /// to the name count.
    pub fn dense(version: u8, layout_hash: u32, names: Arc<[String]>, mut values: Vec<f64>) -> Self {
        values.resize(names.len(), 0.0);
        Self {
            version,
            layout_hash,
            names,
            values: FeatureValues::Dense(values),
        }
    }

    /// Sparse vector over `names`. Out-of-range indices are discarded,
    /// entries are sorted and duplicate indices summed.
    pub fn sparse(version: u8, layout_hash: u32, names: Arc<[String]>, mut entries: Vec<(usize, f64)>) -> Self {
        let dim = names.len();
        entries.retain(|(i, _)| *i < dim);
        entries.sort_by_key(|(i, _)| *i);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (i, v) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == i => *acc += v,
                _ => merged.push((i, v)),
            }
        }

        Self {
            version,
            layout_hash,
            names,
            values: FeatureValues::Sparse(merged),
        }
    }

    /// Build an ad-hoc vector from `(name, value)` pairs, e.g. a JSON feature
    /// map. The layout hash is computed over the pairs' own names (version 0),
    /// so it never equals a trained schema hash by accident.
    /// Later duplicates of a name overwrite earlier ones.
    pub fn from_named<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (name, value) in pairs {
            let name = name.into();
            if let Some(&i) = seen.get(&name) {
                values[i] = value;
            } else {
                seen.insert(name.clone(), names.len());
                names.push(name);
                values.push(value);
            }
        }

        let hash = compute_layout_hash(0, names.as_slice());
        Self::dense(0, hash, names.into(), values)
    }

    /// Number of features (dimension, not non-zeros)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    pub fn values(&self) -> &FeatureValues {
        &self.values
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.values, FeatureValues::Sparse(_))
    }

    /// Get feature by index (0.0 for absent sparse entries)
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.len() {
            return None;
        }
        match &self.values {
            FeatureValues::Dense(v) => v.get(index).copied(),
            FeatureValues::Sparse(entries) => Some(
                entries
                    .binary_search_by_key(&index, |(i, _)| *i)
                    .map(|pos| entries[pos].1)
                    .unwrap_or(0.0),
            ),
        }
    }

    /// Get feature by name (O(n) over names)
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.get(i))
    }

    /// Iterate stored `(index, value)` pairs. Dense vectors yield every index,
    /// sparse vectors only the stored entries.
    pub fn iter_nonzero(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match &self.values {
            FeatureValues::Dense(v) => Box::new(v.iter().copied().enumerate()),
            FeatureValues::Sparse(entries) => Box::new(entries.iter().copied()),
        }
    }

    /// Iterate `(name, value)` for every feature in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let dense = self.to_dense();
        self.names
            .iter()
            .map(|s| s.as_str())
            .zip(dense)
    }

    /// Materialize all values in name order
    pub fn to_dense(&self) -> Vec<f64> {
        match &self.values {
            FeatureValues::Dense(v) => v.clone(),
            FeatureValues::Sparse(entries) => {
                let mut out = vec![0.0; self.len()];
                for &(i, v) in entries {
                    out[i] = v;
                }
                out
            }
        }
    }

    /// Same names, same order (hash first, names to rule out collisions)
    pub fn has_layout(&self, layout_hash: u32, names: &[String]) -> bool {
        self.layout_hash == layout_hash
            && (std::ptr::eq(self.names.as_ptr(), names.as_ptr()) || *self.names == *names)
    }

    /// Convert to JSON format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "dimension": self.len(),
            "named_values": self.iter_nonzero()
                .filter(|(_, v)| *v != 0.0)
                .map(|(i, v)| (self.names[i].clone(), v))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl PartialEq for FeatureVector {
    /// Equal layout and equal values, regardless of dense/sparse storage
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.has_layout(other.layout_hash, &other.names)
            && self.to_dense() == other.to_dense()
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for extractors turning one raw input into one vector
pub trait FeatureExtractor {
    fn extract(&self, input: &str) -> FeatureVector;
}

// ============================================================================
// TESTS
// ============================================================================
