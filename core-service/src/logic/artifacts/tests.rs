//! Store tests against a real directory

use std::fs;

use tempfile::TempDir;

use super::*;
use crate::error::DetectorError;
use crate::logic::features::FeatureSchema;

fn store() -> (TempDir, ArtifactStore) {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path().join("models"));
    (dir, store)
}

#[test]
fn test_save_then_load() {
    let (_dir, store) = store();
    let schema = FeatureSchema::url_layout();

    let path = store.save(ArtifactKind::UrlSchema, &schema).unwrap();
    assert!(path.ends_with("url_schema.json"));
    assert!(store.exists(ArtifactKind::UrlSchema));

    let loaded: FeatureSchema = store.load(ArtifactKind::UrlSchema).unwrap();
    assert_eq!(loaded.names(), schema.names());
    assert_eq!(loaded.layout_hash, schema.layout_hash);
}

#[test]
fn test_missing_file_is_artifact_error() {
    let (_dir, store) = store();
    let err = store.load::<FeatureSchema>(ArtifactKind::EmailSchema).unwrap_err();
    match err {
        DetectorError::ArtifactLoad { artifact, .. } => assert_eq!(artifact, "email_schema"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_tampered_file_rejected() {
    let (_dir, store) = store();
    let schema = FeatureSchema::new(1, vec!["URLLength".into(), "IsHTTPS".into()]);
    let path = store.save(ArtifactKind::UrlSchema, &schema).unwrap();

    let text = fs::read_to_string(&path).unwrap().replace("IsHTTPS", "IsHTTPX");
    fs::write(&path, text).unwrap();

    let err = store.load::<FeatureSchema>(ArtifactKind::UrlSchema).unwrap_err();
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn test_garbage_file_rejected() {
    let (_dir, store) = store();
    fs::create_dir_all(store.root()).unwrap();
    fs::write(store.path_for(ArtifactKind::UrlModel), b"not json").unwrap();

    let err = store.load::<FeatureSchema>(ArtifactKind::UrlModel).unwrap_err();
    assert!(matches!(err, DetectorError::ArtifactLoad { .. }));
}

#[test]
fn test_renamed_file_rejected_by_kind() {
    let (_dir, store) = store();
    store.save(ArtifactKind::EmailSchema, &FeatureSchema::url_layout()).unwrap();
    fs::copy(
        store.path_for(ArtifactKind::EmailSchema),
        store.path_for(ArtifactKind::UrlSchema),
    )
    .unwrap();

    assert!(store.load::<FeatureSchema>(ArtifactKind::UrlSchema).is_err());
    assert!(store.load::<FeatureSchema>(ArtifactKind::EmailSchema).is_ok());
}

#[test]
fn test_inspect_lists_present_artifacts() {
    let (_dir, store) = store();
    assert!(store.inspect().unwrap().is_empty());

    store.save(ArtifactKind::UrlSchema, &FeatureSchema::url_layout()).unwrap();
    let infos = store.inspect().unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].kind, ArtifactKind::UrlSchema);
    assert!(infos[0].verified);
    assert!(infos[0].size_bytes > 0);
}

#[test]
fn test_report_written_beside_artifacts() {
    let (_dir, store) = store();
    let path = store
        .save_report("url", &serde_json::json!({"accuracy": 1.0}))
        .unwrap();
    assert!(path.ends_with("url_report.json"));
    assert!(path.exists());
}
