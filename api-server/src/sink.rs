//! Prediction log dispatch
//!
//! Logging happens off the request path: the response never waits on, or
//! fails because of, the log backend.

use std::sync::Arc;

use phishguard_core::logic::prediction_log::{record_or_warn, PredictionLogEntry, PredictionLogWriter};
use sqlx::PgPool;

use crate::models::PredictionLog;

#[derive(Clone)]
pub enum PredictionStore {
    Disabled,
    Files(Arc<PredictionLogWriter>),
    Postgres(PgPool),
}

impl PredictionStore {
    pub fn name(&self) -> &'static str {
        match self {
            PredictionStore::Disabled => "disabled",
            PredictionStore::Files(_) => "jsonl",
            PredictionStore::Postgres(_) => "postgres",
        }
    }

    /// Fire-and-forget; returns the spawned task so tests can await it
    pub fn dispatch(&self, entry: PredictionLogEntry) -> Option<tokio::task::JoinHandle<()>> {
        match self {
            PredictionStore::Disabled => None,
            PredictionStore::Files(writer) => {
                let writer = Arc::clone(writer);
                Some(tokio::task::spawn_blocking(move || {
                    record_or_warn(writer.as_ref(), &entry);
                }))
            }
            PredictionStore::Postgres(pool) => {
                let pool = pool.clone();
                Some(tokio::spawn(async move {
                    if let Err(e) = PredictionLog::create(&pool, &entry).await {
                        tracing::warn!("Dropping prediction log entry {}: {}", entry.id, e);
                    }
                }))
            }
        }
    }
}
