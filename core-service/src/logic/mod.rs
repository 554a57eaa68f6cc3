//! Logic Module - Detection pipeline & engines
//!
//! ## Architecture
//! - `features/` - URL features, text normalization, schema reconciliation
//! - `vectorizer/` - email bag-of-terms encoding
//! - `model/` - classifiers, scaler, scoring, loaded model context
//! - `artifacts/` - checksummed persistence of trained parts
//! - `dataset/` - CSV training data + train/test split
//! - `training/` - offline fitting and evaluation
//! - `prediction_log/` - downstream record of served predictions

pub mod features;
pub mod vectorizer;
pub mod model;
pub mod artifacts;
pub mod dataset;
pub mod training;
pub mod prediction_log;
