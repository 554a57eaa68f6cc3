//! Router tests against models trained on small fixture datasets

use std::fmt::Write as _;
use std::fs;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use phishguard_core::api::{predict_email, EmailPredictRequest};
use phishguard_core::logic::artifacts::ArtifactStore;
use phishguard_core::logic::prediction_log::PredictionLogWriter;
use phishguard_core::logic::training::{train_email, train_url, TrainingConfig};
use phishguard_core::ModelContext;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use crate::sink::PredictionStore;
use crate::{create_router, AppState};

fn trained_context(dir: &TempDir) -> ModelContext {
    let mut urls = String::from("URL,label\n");
    let mut emails = String::from("Email Text,Email Type\n");
    for i in 0..25 {
        writeln!(urls, "http://secure-login-{i}.verify-account.com/update/pay?id={i},1").unwrap();
        writeln!(urls, "https://www.site{i}.org/docs,0").unwrap();
        writeln!(emails, "Urgent: verify your bank account password now {i},Phishing Email").unwrap();
        writeln!(emails, "Meeting notes for the project review {i} attached,Safe Email").unwrap();
    }
    let url_csv = dir.path().join("urls.csv");
    let email_csv = dir.path().join("emails.csv");
    fs::write(&url_csv, urls).unwrap();
    fs::write(&email_csv, emails).unwrap();

    let store = ArtifactStore::new(dir.path().join("models"));
    let config = TrainingConfig::default();
    train_url(&url_csv, &config, &store).unwrap();
    train_email(&email_csv, &config, &store).unwrap();
    ModelContext::load(&store).unwrap()
}

fn app(sink: PredictionStore) -> (TempDir, Router) {
    let dir = tempdir().unwrap();
    let state = AppState {
        ctx: Arc::new(trained_context(&dir)),
        sink,
    };
    (dir, create_router(state))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_index_and_health() {
    let (_dir, app) = app(PredictionStore::Disabled);

    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Phishing Detection API is running.");

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_model_info() {
    let (_dir, app) = app(PredictionStore::Disabled);
    let (status, body) = get(app, "/api/v1/model").await;
    assert_eq!(status, StatusCode::OK);

    let info: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["url"]["classifier"], "logistic_regression");
    assert_eq!(info["email"]["classifier"], "multinomial_nb");
    assert!(info["email"]["feature_count"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_predict_url() {
    let (_dir, app) = app(PredictionStore::Disabled);

    let (status, body) = post_json(
        app.clone(),
        "/predict/url",
        json!({"url": "http://secure-login-99.verify-account.com/update/pay?id=99"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Phishing");
    let p = body["probability"].as_f64().unwrap();
    assert!((0.5..=1.0).contains(&p));
    assert_eq!(body["schema"]["missing"], json!([]));

    let (status, body) = post_json(app, "/predict/url", json!({"url": "https://www.site99.org/docs"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Legitimate");
}

#[tokio::test]
async fn test_predict_url_features_reports_drift() {
    let (_dir, app) = app(PredictionStore::Disabled);
    let (status, body) = post_json(
        app,
        "/predict/url",
        json!({"features": {"URLLength": 60, "IsHTTPS": 0, "NotAFeature": 1}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["schema"]["dropped"], json!(["NotAFeature"]));
    assert!(!body["schema"]["missing"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_email() {
    let (_dir, app) = app(PredictionStore::Disabled);

    let (status, body) = post_json(
        app.clone(),
        "/predict/email",
        json!({"email_text": "URGENT: verify your bank password now!!!"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Phishing email");

    let (status, body) = post_json(
        app,
        "/predict/email",
        json!({"email_text": "Notes from the project meeting are attached"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Safe Email");
}

#[tokio::test]
async fn test_invalid_input_is_400() {
    let (_dir, app) = app(PredictionStore::Disabled);

    for (uri, body) in [
        ("/predict/url", json!({})),
        ("/predict/url", json!({"url": "   "})),
        ("/predict/url", json!({"url": "http://a.com", "features": {"URLLength": 1}})),
        ("/predict/url", json!({"features": {}})),
        ("/predict/email", json!({})),
        ("/predict/email", json!({"email_text": ""})),
    ] {
        let (status, response) = post_json(app.clone(), uri, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(response["status"], 400);
        assert!(response["error"].is_string());
    }
}

#[tokio::test]
async fn test_overflowing_feature_map_is_400() {
    let (_dir, app) = app(PredictionStore::Disabled);
    let (status, body) = post_json(
        app,
        "/predict/url",
        json!({"features": {"LetterRatio": 1e308, "DigitRatio": 1e308}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body.get("probability").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (_dir, app) = app(PredictionStore::Disabled);
    let request = Request::builder()
        .method("POST")
        .uri("/predict/email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_predictions_logged_to_files() {
    let log_dir = tempdir().unwrap();
    let writer = Arc::new(PredictionLogWriter::from_path(log_dir.path()).unwrap());
    let (_dir, app) = app(PredictionStore::Files(Arc::clone(&writer)));

    let (status, _) = post_json(app, "/predict/url", json!({"url": "https://www.site1.org/docs"})).await;
    assert_eq!(status, StatusCode::OK);

    // Logging runs detached from the request; poll until it lands
    let mut content = String::new();
    for _ in 0..100 {
        if let Some(name) = writer.stats().unwrap().current_file {
            content = fs::read_to_string(writer.base_dir().join(name)).unwrap();
            if !content.is_empty() {
                break;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let line: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(line["input"], "https://www.site1.org/docs");
    assert_eq!(line["prediction"], "Legitimate");
    assert_eq!(line["modality"], "url");
}

#[tokio::test]
async fn test_disabled_store_dispatches_nothing() {
    let dir = tempdir().unwrap();
    let ctx = trained_context(&dir);
    let request = EmailPredictRequest {
        email_text: Some("Lunch on Friday?".into()),
    };
    let entry = predict_email(&ctx, &request).unwrap().log_entry();

    let store = PredictionStore::Disabled;
    assert_eq!(store.name(), "disabled");
    assert!(store.dispatch(entry).is_none());
}
