//! Prediction Log Module - downstream record of served predictions
//!
//! Each scored request can be offered to a `PredictionSink`. Sinks are
//! best-effort: a failing sink never changes the prediction returned to the
//! caller, `record_or_warn` logs and swallows the error.
//!
//! The default sink writes JSONL files with automatic rotation.

pub mod record;
pub mod writer;


use thiserror::Error;

pub use record::{PredictionLogEntry, MAX_LOGGED_INPUT_CHARS};
pub use writer::{LogStats, PredictionLogWriter};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("prediction log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prediction log serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("prediction log backend error: {0}")]
    Backend(String),
}

/// Destination for prediction log entries
pub trait PredictionSink: Send + Sync {
    fn record(&self, entry: &PredictionLogEntry) -> Result<(), SinkError>;
}

/// Offer `entry` to `sink`; failures are logged, never returned
pub fn record_or_warn(sink: &dyn PredictionSink, entry: &PredictionLogEntry) -> bool {
    match sink.record(entry) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Dropping prediction log entry {}: {}", entry.id, e);
            false
        }
    }
}
