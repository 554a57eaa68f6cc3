//! Feature Schema - persisted input contract of a trained classifier
//!
//! A schema is produced once per training run and loaded read-only at
//! serving time. `reconcile` aligns a freshly computed vector to it:
//! - schema names missing from the vector are zero-filled
//! - vector names absent from the schema are dropped
//!
//! The zero-fill keeps old artifacts working after extractor changes, but it
//! also hides renamed or reordered features. Every substitution is therefore
//! reported in `SchemaDiagnostics` and logged.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::layout::{compute_layout_hash, url_layout_hash, URL_FEATURE_LAYOUT, URL_FEATURE_VERSION};
use super::vector::FeatureVector;

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SchemaRepr", into = "SchemaRepr")]
pub struct FeatureSchema {
    pub version: u8,
    pub layout_hash: u32,
    names: Arc<[String]>,
}

/// On-disk shape of a schema
#[derive(Serialize, Deserialize)]
struct SchemaRepr {
    version: u8,
    layout_hash: u32,
    names: Vec<String>,
}

impl From<SchemaRepr> for FeatureSchema {
    fn from(repr: SchemaRepr) -> Self {
        Self {
            version: repr.version,
            layout_hash: repr.layout_hash,
            names: repr.names.into(),
        }
    }
}

impl From<FeatureSchema> for SchemaRepr {
    fn from(schema: FeatureSchema) -> Self {
        Self {
            version: schema.version,
            layout_hash: schema.layout_hash,
            names: schema.names.to_vec(),
        }
    }
}

impl FeatureSchema {
    pub fn new(version: u8, names: Vec<String>) -> Self {
        let layout_hash = compute_layout_hash(version, names.as_slice());
        Self {
            version,
            layout_hash,
            names: names.into(),
        }
    }

    /// Schema of the current URL extractor layout
    pub fn url_layout() -> Self {
        Self {
            version: URL_FEATURE_VERSION,
            layout_hash: url_layout_hash(),
            names: super::layout::url_feature_names(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Stored hash agrees with the stored names
    pub fn is_consistent(&self) -> bool {
        compute_layout_hash(self.version, self.names()) == self.layout_hash
    }

    /// Same layout as the URL extractor currently produces
    pub fn matches_url_layout(&self) -> bool {
        self.layout_hash == url_layout_hash()
            && self.names.iter().map(String::as_str).eq(URL_FEATURE_LAYOUT.iter().copied())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// What reconciliation had to paper over
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiagnostics {
    /// Schema features absent from the input, substituted with 0.0
    pub missing: Vec<String>,
    /// Input features absent from the schema, ignored
    pub dropped: Vec<String>,
}

impl SchemaDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.dropped.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

// ============================================================================
// RECONCILIATION
// ============================================================================

/// Align `raw` to `schema` (zero-fill missing, drop extra)
pub fn reconcile(raw: &FeatureVector, schema: &FeatureSchema) -> (FeatureVector, SchemaDiagnostics) {
    // Fast path: already in schema layout, keep storage (sparse stays sparse)
    if raw.has_layout(schema.layout_hash, schema.names()) {
        let mut aligned = raw.clone();
        aligned.version = schema.version;
        return (aligned, SchemaDiagnostics::default());
    }

    let mut by_name: HashMap<&str, f64> = HashMap::with_capacity(raw.len());
    for (name, value) in raw.iter() {
        by_name.insert(name, value);
    }

    let mut diagnostics = SchemaDiagnostics::default();
    let mut values = Vec::with_capacity(schema.len());
    for name in schema.names() {
        match by_name.remove(name.as_str()) {
            Some(v) => values.push(v),
            None => {
                values.push(0.0);
                diagnostics.missing.push(name.clone());
            }
        }
    }

    // Whatever is left was not consumed by the schema; keep input order
    diagnostics.dropped = raw
        .names()
        .iter()
        .filter(|n| by_name.contains_key(n.as_str()))
        .cloned()
        .collect();

    if !diagnostics.is_clean() {
        log::warn!(
            "Feature schema mismatch (schema v{} {:08x}): {} missing zero-filled, {} dropped",
            schema.version,
            schema.layout_hash,
            diagnostics.missing_count(),
            diagnostics.dropped_count()
        );
    }

    let aligned = FeatureVector::dense(
        schema.version,
        schema.layout_hash,
        schema.shared_names(),
        values,
    );
    (aligned, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(1, names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_zero_fill_and_drop() {
        let s = schema(&["a", "b", "c"]);
        let raw = FeatureVector::from_named(vec![("c", 3.0), ("x", 9.0), ("a", 1.0)]);

        let (aligned, diag) = reconcile(&raw, &s);
        assert_eq!(aligned.to_dense(), vec![1.0, 0.0, 3.0]);
        assert_eq!(aligned.names(), s.names());
        assert_eq!(aligned.layout_hash, s.layout_hash);
        assert_eq!(diag.missing, vec!["b".to_string()]);
        assert_eq!(diag.dropped, vec!["x".to_string()]);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let s = schema(&["a", "b"]);
        let raw = FeatureVector::from_named(vec![("b", 2.0), ("z", 1.0)]);

        let (once, _) = reconcile(&raw, &s);
        let (twice, diag) = reconcile(&once, &s);
        assert_eq!(once, twice);
        assert!(diag.is_clean());
    }

    #[test]
    fn test_fast_path_keeps_sparse() {
        let s = schema(&["a", "b", "c"]);
        let raw = FeatureVector::sparse(1, s.layout_hash, s.shared_names(), vec![(2, 5.0)]);

        let (aligned, diag) = reconcile(&raw, &s);
        assert!(aligned.is_sparse());
        assert!(diag.is_clean());
        assert_eq!(aligned.get(2), Some(5.0));
    }

    #[test]
    fn test_reordered_features_are_realigned() {
        let s = schema(&["a", "b"]);
        let raw = FeatureVector::from_named(vec![("b", 2.0), ("a", 1.0)]);
        let (aligned, diag) = reconcile(&raw, &s);
        assert_eq!(aligned.to_dense(), vec![1.0, 2.0]);
        assert!(diag.is_clean());
    }

    #[test]
    fn test_url_layout_schema() {
        let s = FeatureSchema::url_layout();
        assert!(s.matches_url_layout());
        assert!(s.is_consistent());
        assert!(!schema(&["URLLength"]).matches_url_layout());
    }

    #[test]
    fn test_schema_serde_roundtrip_keeps_hash() {
        let s = schema(&["URLLength", "IsHTTPS"]);
        let json = serde_json::to_string(&s).unwrap();
        let back: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back.names(), s.names());
        assert_eq!(back.layout_hash, s.layout_hash);
        assert!(back.is_consistent());
    }
}
