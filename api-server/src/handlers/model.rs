//! Loaded model metadata

use axum::{extract::State, Json};
use phishguard_core::logic::model::ModelInfo;

use crate::AppState;

pub async fn info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.ctx.info())
}
