//! Prediction log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use phishguard_core::logic::prediction_log::PredictionLogEntry;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PredictionLog {
    pub id: Uuid,
    pub modality: String,
    pub input: String,
    pub prediction: String,
    pub probability: f64,
    pub class_id: i32,
    pub missing_features: serde_json::Value,
    pub dropped_features: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<&PredictionLogEntry> for PredictionLog {
    fn from(entry: &PredictionLogEntry) -> Self {
        Self {
            id: entry.id,
            modality: entry.modality.as_str().to_string(),
            input: entry.input.clone(),
            prediction: entry.prediction.clone(),
            probability: entry.probability,
            class_id: entry.class_id as i32,
            missing_features: serde_json::json!(entry.missing_features),
            dropped_features: serde_json::json!(entry.dropped_features),
            created_at: entry.timestamp,
        }
    }
}

impl PredictionLog {
    pub async fn create(pool: &PgPool, entry: &PredictionLogEntry) -> Result<Self, sqlx::Error> {
        let row = PredictionLog::from(entry);

        sqlx::query_as::<_, PredictionLog>(
            r#"
            INSERT INTO prediction_logs (id, modality, input, prediction, probability, class_id, missing_features, dropped_features, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(row.id)
        .bind(&row.modality)
        .bind(&row.input)
        .bind(&row.prediction)
        .bind(row.probability)
        .bind(row.class_id)
        .bind(&row.missing_features)
        .bind(&row.dropped_features)
        .bind(row.created_at)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::logic::features::SchemaDiagnostics;
    use phishguard_core::logic::model::{Label, Modality, PredictionResult};

    #[test]
    fn test_row_from_entry() {
        let result = PredictionResult {
            label: Label::Legitimate,
            class_id: 0,
            probability: 0.75,
            diagnostics: SchemaDiagnostics {
                missing: vec!["IsHTTPS".to_string()],
                dropped: vec![],
            },
            inference_time_us: 5,
        };
        let entry = PredictionLogEntry::new(Modality::Url, "https://a.com", &result);
        let row = PredictionLog::from(&entry);

        assert_eq!(row.id, entry.id);
        assert_eq!(row.modality, "url");
        assert_eq!(row.prediction, "Legitimate");
        assert_eq!(row.class_id, 0);
        assert_eq!(row.missing_features, serde_json::json!(["IsHTTPS"]));
        assert_eq!(row.dropped_features, serde_json::json!([]));
    }
}
