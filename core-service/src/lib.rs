//! PhishGuard Core - URL and email phishing detection
//!
//! Feature engineering, model artifacts, scoring and training.
//! The `phishguard` binary and the HTTP server are thin front ends over
//! `api::predict` and `logic::training`.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use error::{DetectorError, DetectorResult};
pub use logic::model::{ModelContext, PredictionResult};
