//! Artifact Envelope - versioned, checksummed wrapper around one artifact
//!
//! ```json
//! { "format_version": 1, "kind": "url_scaler", "created_at": "...",
//!   "checksum": "<sha256 hex of payload bytes>", "payload": { ... } }
//! ```
//!
//! The payload is kept as raw JSON text so the checksum covers exactly the
//! bytes on disk, whatever formatting the envelope itself uses.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};

use crate::error::{DetectorError, DetectorResult};

/// Current envelope format
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    UrlSchema,
    UrlScaler,
    UrlModel,
    EmailSchema,
    EmailVocabulary,
    EmailModel,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::UrlSchema,
        ArtifactKind::UrlScaler,
        ArtifactKind::UrlModel,
        ArtifactKind::EmailSchema,
        ArtifactKind::EmailVocabulary,
        ArtifactKind::EmailModel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::UrlSchema => "url_schema",
            ArtifactKind::UrlScaler => "url_scaler",
            ArtifactKind::UrlModel => "url_model",
            ArtifactKind::EmailSchema => "email_schema",
            ArtifactKind::EmailVocabulary => "email_vocabulary",
            ArtifactKind::EmailModel => "email_model",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub created_at: DateTime<Utc>,
    pub checksum: String,
    pub payload: Box<RawValue>,
}

impl ArtifactEnvelope {
    /// Serialize `value` and wrap it
    pub fn seal<T: Serialize>(kind: ArtifactKind, value: &T) -> DetectorResult<Self> {
        let json = serde_json::to_string(value)?;
        let checksum = sha256_hex(json.as_bytes());
        let payload = RawValue::from_string(json)?;
        Ok(Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            kind,
            created_at: Utc::now(),
            checksum,
            payload,
        })
    }

    /// Check format, kind and checksum without decoding the payload
    pub fn verify(&self, expected: ArtifactKind) -> DetectorResult<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(DetectorError::artifact(
                expected.as_str(),
                format!(
                    "unsupported format version {} (expected {})",
                    self.format_version, ARTIFACT_FORMAT_VERSION
                ),
            ));
        }
        if self.kind != expected {
            return Err(DetectorError::artifact(
                expected.as_str(),
                format!("file holds a '{}' artifact", self.kind),
            ));
        }
        let actual = sha256_hex(self.payload.get().as_bytes());
        if actual != self.checksum {
            return Err(DetectorError::artifact(
                expected.as_str(),
                format!("checksum mismatch (stored {}, computed {})", self.checksum, actual),
            ));
        }
        Ok(())
    }

    /// Verify, then decode the payload
    pub fn open<T: DeserializeOwned>(&self, expected: ArtifactKind) -> DetectorResult<T> {
        self.verify(expected)?;
        serde_json::from_str(self.payload.get()).map_err(|e| {
            DetectorError::artifact(expected.as_str(), format!("invalid payload: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        values: Vec<f64>,
    }

    #[test]
    fn test_seal_and_open() {
        let value = Payload { values: vec![1.5, -2.0] };
        let env = ArtifactEnvelope::seal(ArtifactKind::UrlScaler, &value).unwrap();
        assert_eq!(env.format_version, ARTIFACT_FORMAT_VERSION);

        // Pretty printing the envelope must not disturb the payload checksum
        let text = serde_json::to_string_pretty(&env).unwrap();
        let back: ArtifactEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back.open::<Payload>(ArtifactKind::UrlScaler).unwrap(), value);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let env = ArtifactEnvelope::seal(ArtifactKind::UrlScaler, &Payload { values: vec![] }).unwrap();
        let err = env.open::<Payload>(ArtifactKind::EmailModel).unwrap_err();
        assert!(err.to_string().contains("url_scaler"));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let env = ArtifactEnvelope::seal(ArtifactKind::UrlModel, &Payload { values: vec![1.0] }).unwrap();
        let text = serde_json::to_string(&env).unwrap().replace("[1.0]", "[9.0]");
        let back: ArtifactEnvelope = serde_json::from_str(&text).unwrap();
        let err = back.verify(ArtifactKind::UrlModel).unwrap_err();
        assert!(matches!(err, DetectorError::ArtifactLoad { .. }));
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_future_format_rejected() {
        let mut env = ArtifactEnvelope::seal(ArtifactKind::EmailSchema, &Payload { values: vec![] }).unwrap();
        env.format_version = ARTIFACT_FORMAT_VERSION + 1;
        assert!(env.verify(ArtifactKind::EmailSchema).is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ArtifactKind::EmailVocabulary.file_name(), "email_vocabulary.json");
        assert_eq!(ArtifactKind::ALL.len(), 6);
    }
}
