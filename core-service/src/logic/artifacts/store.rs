use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::get_model_dir;
use crate::error::{DetectorError, DetectorResult};

use super::envelope::{ArtifactEnvelope, ArtifactKind};

/// Directory of model artifacts, one envelope file per kind
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

/// Summary of one stored artifact (for `inspect`)
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    pub checksum: String,
    pub size_bytes: u64,
    pub verified: bool,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$PHISHGUARD_MODEL_DIR` or the per-user data directory
    pub fn default_location() -> Self {
        Self::new(get_model_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    pub fn exists(&self, kind: ArtifactKind) -> bool {
        self.path_for(kind).exists()
    }

    /// Seal and write `value`; the file is replaced atomically
    pub fn save<T: Serialize>(&self, kind: ArtifactKind, value: &T) -> DetectorResult<PathBuf> {
        fs::create_dir_all(&self.root)?;

        let envelope = ArtifactEnvelope::seal(kind, value)?;
        let json = serde_json::to_vec_pretty(&envelope)?;

        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        log::info!("Saved artifact {} → {}", kind, path.display());
        Ok(path)
    }

    fn read_envelope(&self, kind: ArtifactKind) -> DetectorResult<(ArtifactEnvelope, u64)> {
        let path = self.path_for(kind);
        let data = fs::read(&path).map_err(|e| {
            DetectorError::artifact(kind.as_str(), format!("{}: {}", path.display(), e))
        })?;
        let envelope = serde_json::from_slice(&data).map_err(|e| {
            DetectorError::artifact(kind.as_str(), format!("malformed envelope: {}", e))
        })?;
        Ok((envelope, data.len() as u64))
    }

    /// Read, verify and decode one artifact
    pub fn load<T: DeserializeOwned>(&self, kind: ArtifactKind) -> DetectorResult<T> {
        let (envelope, _) = self.read_envelope(kind)?;
        let value = envelope.open(kind)?;
        log::debug!("Loaded artifact {} (created {})", kind, envelope.created_at);
        Ok(value)
    }

    /// Envelope metadata of every artifact present
    pub fn inspect(&self) -> DetectorResult<Vec<ArtifactInfo>> {
        let mut infos = Vec::new();
        for kind in ArtifactKind::ALL {
            if !self.exists(kind) {
                continue;
            }
            let (envelope, size) = self.read_envelope(kind)?;
            infos.push(ArtifactInfo {
                kind,
                path: self.path_for(kind),
                format_version: envelope.format_version,
                created_at: envelope.created_at,
                checksum: envelope.checksum.clone(),
                size_bytes: size,
                verified: envelope.verify(kind).is_ok(),
            });
        }
        Ok(infos)
    }

    /// Plain JSON side file (training reports), not an artifact
    pub fn save_report<T: Serialize>(&self, name: &str, report: &T) -> DetectorResult<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(format!("{}_report.json", name));
        fs::write(&path, serde_json::to_vec_pretty(report)?)?;
        Ok(path)
    }
}
