//! Bundle manifest with SHA-256 integrity digests.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{ArtifactError, ArtifactResult};

/// Manifest file name inside a bundle directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Digest index over every artifact file in a bundle.
///
/// Written at export time alongside the artifacts; a bundle whose files
/// no longer match their recorded digests is refused at load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Manifest {
    /// Artifact file name → SHA-256 hex digest.
    pub artifacts: BTreeMap<String, String>,
}

impl Manifest {
    /// Read `manifest.json` from a bundle directory.
    pub fn load(dir: &Path) -> ArtifactResult<Self> {
        let bytes = fs::read(dir.join(MANIFEST_FILE)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::Missing(MANIFEST_FILE.to_string()),
            _ => ArtifactError::Io(MANIFEST_FILE.to_string(), e),
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ArtifactError::Json(MANIFEST_FILE.to_string(), e))
    }

    /// Record a file's digest.
    pub fn insert(&mut self, file: &str, data: &[u8]) {
        self.artifacts.insert(file.to_string(), hash_data(data));
    }

    /// Read an artifact file and verify it against the recorded digest.
    pub fn read_verified(&self, dir: &Path, file: &str) -> ArtifactResult<Vec<u8>> {
        let expected = self
            .artifacts
            .get(file)
            .ok_or_else(|| ArtifactError::Missing(file.to_string()))?;

        let bytes = fs::read(dir.join(file)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::Missing(file.to_string()),
            _ => ArtifactError::Io(file.to_string(), e),
        })?;

        if hash_data(&bytes) != *expected {
            return Err(ArtifactError::ChecksumMismatch(file.to_string()));
        }
        Ok(bytes)
    }
}

/// Compute SHA-256 hash of data.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}
