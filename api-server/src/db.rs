//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Served predictions
CREATE TABLE IF NOT EXISTS prediction_logs (
    id UUID PRIMARY KEY,
    modality VARCHAR(10) NOT NULL,
    input TEXT NOT NULL,
    prediction VARCHAR(50) NOT NULL,
    probability DOUBLE PRECISION NOT NULL,
    class_id INT NOT NULL,
    missing_features JSONB NOT NULL DEFAULT '[]',
    dropped_features JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_prediction_logs_created ON prediction_logs(created_at);
CREATE INDEX IF NOT EXISTS idx_prediction_logs_modality ON prediction_logs(modality, created_at);
"#;
