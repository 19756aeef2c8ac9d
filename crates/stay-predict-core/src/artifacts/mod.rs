//! Artifact bundle loading.
//!
//! A bundle is one directory of JSON artifacts exported at training time
//! plus a manifest of SHA-256 digests. Loading is a startup-time,
//! fail-fast operation: every artifact and both reference lists must
//! parse and cross-check, or the host cannot serve predictions. There is
//! no retry — the files are static, so a second read cannot succeed
//! where the first failed.

mod classifier;
mod encoders;
mod manifest;
mod reference;
mod schema;

pub use classifier::*;
pub use encoders::*;
pub use manifest::*;
pub use reference::*;
pub use schema::*;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Bundle file names.
pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const TARGET_ENCODER_FILE: &str = "target_encoder.json";
pub const ONE_HOT_FILE: &str = "one_hot.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const TRAIN_COLUMNS_FILE: &str = "train_columns.json";
pub const DOCTOR_FILE: &str = "doctor.json";
pub const HOSPITAL_FILE: &str = "hospital.json";

/// Artifact loading errors. All fatal: predictions cannot be served
/// without the full bundle.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("I/O error reading {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("artifact missing from bundle: {0}")]
    Missing(String),

    #[error("JSON error in {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("checksum mismatch for {0}")]
    ChecksumMismatch(String),

    #[error("corrupt artifact {0}: {1}")]
    Corrupt(String, String),

    #[error("classifier expects {expected} features but the training schema has {found} columns")]
    SchemaMismatch { expected: usize, found: usize },
}

pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Every trained artifact plus the reference lists, loaded once at
/// startup and shared read-only for the life of the process.
pub struct PredictionContext {
    pub classifier: Box<dyn Classifier>,
    pub target_encoder: TargetEncoder,
    pub one_hot: OneHotEncoder,
    pub scaler: Scaler,
    pub schema: TrainingSchema,
    pub reference: ReferenceLists,
}

impl std::fmt::Debug for PredictionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionContext")
            .field("classifier_n_features", &self.classifier.n_features())
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl PredictionContext {
    /// Load and verify a bundle directory.
    pub fn load<P: AsRef<Path>>(dir: P) -> ArtifactResult<Self> {
        let dir = dir.as_ref();
        let manifest = Manifest::load(dir)?;

        let forest: Forest = parse_artifact(&manifest, dir, CLASSIFIER_FILE)?;
        let target_encoder: TargetEncoder = parse_artifact(&manifest, dir, TARGET_ENCODER_FILE)?;
        let one_hot: OneHotEncoder = parse_artifact(&manifest, dir, ONE_HOT_FILE)?;
        let scaler: Scaler = parse_artifact(&manifest, dir, SCALER_FILE)?;
        let schema: TrainingSchema = parse_artifact(&manifest, dir, TRAIN_COLUMNS_FILE)?;
        let doctors: Vec<String> = parse_artifact(&manifest, dir, DOCTOR_FILE)?;
        let hospitals: Vec<String> = parse_artifact(&manifest, dir, HOSPITAL_FILE)?;

        forest
            .validate()
            .map_err(|reason| ArtifactError::Corrupt(CLASSIFIER_FILE.to_string(), reason))?;
        scaler
            .validate()
            .map_err(|reason| ArtifactError::Corrupt(SCALER_FILE.to_string(), reason))?;

        log::info!(
            "loaded artifact bundle: {} trees, {} training columns, {} doctors, {} hospitals",
            forest.trees.len(),
            schema.len(),
            doctors.len(),
            hospitals.len()
        );

        Self::from_parts(
            Box::new(forest),
            target_encoder,
            one_hot,
            scaler,
            schema,
            ReferenceLists::new(doctors, hospitals),
        )
    }

    /// Assemble a context from already-loaded artifacts, running the
    /// same cross-checks as [`PredictionContext::load`].
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        target_encoder: TargetEncoder,
        one_hot: OneHotEncoder,
        scaler: Scaler,
        schema: TrainingSchema,
        reference: ReferenceLists,
    ) -> ArtifactResult<Self> {
        if classifier.n_features() != schema.len() {
            return Err(ArtifactError::SchemaMismatch {
                expected: classifier.n_features(),
                found: schema.len(),
            });
        }
        Ok(Self {
            classifier,
            target_encoder,
            one_hot,
            scaler,
            schema,
            reference,
        })
    }
}

fn parse_artifact<T: DeserializeOwned>(
    manifest: &Manifest,
    dir: &Path,
    file: &str,
) -> ArtifactResult<T> {
    let bytes = manifest.read_verified(dir, file)?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Json(file.to_string(), e))
}
