//! Prediction handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use phishguard_core::api::{
    predict_email, predict_url, EmailPredictRequest, PredictResponse, Prediction, UrlPredictRequest,
};

use crate::{AppResult, AppState};

/// Classify a URL, or a precomputed feature map
pub async fn url(
    State(state): State<AppState>,
    payload: Result<Json<UrlPredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload?;
    let prediction = predict_url(&state.ctx, &req)?;
    Ok(Json(respond(&state, prediction)))
}

/// Classify an email body
pub async fn email(
    State(state): State<AppState>,
    payload: Result<Json<EmailPredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload?;
    let prediction = predict_email(&state.ctx, &req)?;
    Ok(Json(respond(&state, prediction)))
}

fn respond(state: &AppState, prediction: Prediction) -> PredictResponse {
    let response = prediction.response();
    tracing::debug!(
        "{} prediction: {} ({:.3}) in {}us",
        prediction.modality,
        response.prediction,
        response.probability,
        prediction.result.inference_time_us
    );
    if !prediction.result.diagnostics.is_clean() {
        tracing::warn!(
            "{} input reconciled: {} missing, {} dropped",
            prediction.modality,
            prediction.result.diagnostics.missing.len(),
            prediction.result.diagnostics.dropped.len()
        );
    }
    state.sink.dispatch(prediction.log_entry());
    response
}
