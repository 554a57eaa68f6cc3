//! Artifacts Module - persistence of trained model parts
//!
//! - `envelope` - format version, kind, checksum around each payload
//! - `store` - one file per artifact kind inside a model directory
//!
//! Every load failure (missing file, bad checksum, wrong kind, undecodable
//! payload) surfaces as `DetectorError::ArtifactLoad` naming the artifact.

pub mod envelope;
pub mod store;

#[cfg(test)]
mod tests;

pub use envelope::{ArtifactEnvelope, ArtifactKind, ARTIFACT_FORMAT_VERSION};
pub use store::{ArtifactInfo, ArtifactStore};
