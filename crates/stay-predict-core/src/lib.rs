//! Stay-Predict Core Library
//!
//! Hospital length-of-stay prediction: a pre-trained decision-forest
//! classifier behind a fixed feature-preprocessing pipeline.
//!
//! # Architecture
//!
//! ```text
//! Form / CLI / API host
//!         │ RecordInput
//!         ▼
//!    Validation ── domain + reference-list checks ──► ValidationError
//!         │ PatientRecord
//!         ▼
//!  Feature Pipeline
//!    assemble → target-encode → one-hot encode → scale → align
//!         │ FeatureVector (columns == training schema)
//!         ▼
//!    Classifier (decision forest) ──► class code ∈ {0, 1, 2}
//!         ▼
//!    StayCategory ──► display label
//! ```
//!
//! # Core Principle
//!
//! **The pipeline must reproduce training-time preprocessing exactly.**
//! Every artifact (classifier, target encoder, one-hot encoder, scaler,
//! training schema, reference lists) is loaded once at startup into an
//! immutable [`PredictionContext`] and shared read-only by every request.
//!
//! # Modules
//!
//! - [`artifacts`]: bundle loading, trained encoders, forest inference
//! - [`models`]: domain types (PatientRecord, StayCategory, Prediction)
//! - [`pipeline`]: boundary validation and the feature transformation
//! - [`predictor`]: the predict() entry point

pub mod artifacts;
pub mod models;
pub mod pipeline;
pub mod predictor;

// Re-export commonly used types
pub use artifacts::{
    ArtifactError, Classifier, Forest, InferenceError, Manifest, OneHotEncoder, PredictionContext,
    ReferenceLists, Scaler, TargetEncoder, TrainingSchema,
};
pub use models::{
    AdmissionType, BloodType, Gender, InsuranceProvider, MedicalCondition, Medication,
    PatientRecord, Prediction, RecordInput, StayCategory, TestResult, UnknownClassError,
    ValidationError,
};
pub use pipeline::{FeaturePipeline, FeatureVector, Validator};
pub use predictor::{PredictError, Predictor};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum StayPredictError {
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),
}

impl From<ArtifactError> for StayPredictError {
    fn from(e: ArtifactError) -> Self {
        StayPredictError::ArtifactError(e.to_string())
    }
}

impl From<ValidationError> for StayPredictError {
    fn from(e: ValidationError) -> Self {
        let message = match e.suggestion() {
            Some(suggestion) => format!("{} (did you mean {:?}?)", e, suggestion),
            None => e.to_string(),
        };
        StayPredictError::ValidationError(message)
    }
}

impl From<PredictError> for StayPredictError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::Validation(v) => v.into(),
            PredictError::Inference(i) => StayPredictError::InferenceError(i.to_string()),
            PredictError::UnknownClass(u) => StayPredictError::InferenceError(u.to_string()),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Load an artifact bundle directory and build a predictor.
#[uniffi::export]
pub fn load_predictor(dir: String) -> Result<Arc<StayPredictorCore>, StayPredictError> {
    let predictor = Predictor::load(&dir)?;
    Ok(Arc::new(StayPredictorCore { predictor }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Prediction service wrapper for FFI.
///
/// The artifact context is immutable after load, so no lock is needed:
/// hosts may call from any number of threads.
#[derive(uniffi::Object)]
pub struct StayPredictorCore {
    predictor: Predictor,
}

#[uniffi::export]
impl StayPredictorCore {
    /// Run one prediction for a fully-populated form submission.
    pub fn predict(&self, record: FfiPatientRecord) -> Result<FfiPrediction, StayPredictError> {
        let input: RecordInput = record.into();
        let prediction = self.predictor.predict(&input)?;
        Ok(prediction.into())
    }

    /// Everything a host needs to populate the entry form.
    pub fn form_options(&self) -> FfiFormOptions {
        let reference = &self.predictor.context().reference;
        FfiFormOptions {
            doctors: reference.doctors.clone(),
            hospitals: reference.hospitals.clone(),
            genders: display_names(&Gender::ALL, |v| v.as_str()),
            blood_types: display_names(&BloodType::ALL, |v| v.as_str()),
            medical_conditions: display_names(&MedicalCondition::ALL, |v| v.as_str()),
            insurance_providers: display_names(&InsuranceProvider::ALL, |v| v.as_str()),
            admission_types: display_names(&AdmissionType::ALL, |v| v.as_str()),
            medications: display_names(&Medication::ALL, |v| v.as_str()),
            test_results: display_names(&TestResult::ALL, |v| v.as_str()),
        }
    }

    /// Valid doctor names.
    pub fn doctors(&self) -> Vec<String> {
        self.predictor.context().reference.doctors.clone()
    }

    /// Valid hospital names.
    pub fn hospitals(&self) -> Vec<String> {
        self.predictor.context().reference.hospitals.clone()
    }
}

fn display_names<T>(all: &[T], as_str: impl Fn(&T) -> &'static str) -> Vec<String> {
    all.iter().map(|v| as_str(v).to_string()).collect()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe form submission.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub age: i64,
    pub billing_amount: f64,
    pub doctor: String,
    pub hospital: String,
    pub gender: String,
    pub blood_type: String,
    pub medical_condition: String,
    pub insurance_provider: String,
    pub admission_type: String,
    pub medication: String,
    pub test_results: String,
}

impl From<FfiPatientRecord> for RecordInput {
    fn from(record: FfiPatientRecord) -> Self {
        RecordInput {
            age: record.age,
            billing_amount: record.billing_amount,
            doctor: record.doctor,
            hospital: record.hospital,
            gender: record.gender,
            blood_type: record.blood_type,
            medical_condition: record.medical_condition,
            insurance_provider: record.insurance_provider,
            admission_type: record.admission_type,
            medication: record.medication,
            test_results: record.test_results,
        }
    }
}

/// FFI-safe prediction result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrediction {
    pub id: String,
    pub class_code: u32,
    pub label: String,
    pub predicted_at: String,
}

impl From<Prediction> for FfiPrediction {
    fn from(prediction: Prediction) -> Self {
        Self {
            id: prediction.id,
            class_code: prediction.category.code(),
            label: prediction.category.label().to_string(),
            predicted_at: prediction.predicted_at,
        }
    }
}

/// FFI-safe option lists for form population.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormOptions {
    pub doctors: Vec<String>,
    pub hospitals: Vec<String>,
    pub genders: Vec<String>,
    pub blood_types: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub insurance_providers: Vec<String>,
    pub admission_types: Vec<String>,
    pub medications: Vec<String>,
    pub test_results: Vec<String>,
}
