//! Features Module - Feature Extraction Engine
//!
//! Raw inputs → versioned feature vectors.
//! - `layout` - URL feature names, version and layout hash
//! - `vector` - FeatureVector (dense or sparse, always named)
//! - `host` - public-suffix host split and URL path parsing
//! - `url` - URL feature extractor
//! - `text` - email text normalizer
//! - `schema` - persisted FeatureSchema + reconciliation

pub mod layout;
pub mod vector;
pub mod host;
pub mod url;
pub mod text;
pub mod schema;


// Re-export common types
pub use layout::{LayoutInfo, URL_FEATURE_COUNT, URL_FEATURE_LAYOUT, URL_FEATURE_VERSION};
pub use schema::{reconcile, FeatureSchema, SchemaDiagnostics};
pub use text::{normalize, TextNormalizer};
pub use url::UrlFeatureExtractor;
pub use vector::{FeatureExtractor, FeatureValues, FeatureVector};
