//! Top-level prediction flow: validate → transform → infer → present.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::artifacts::{ArtifactError, InferenceError, PredictionContext};
use crate::models::{
    PatientRecord, Prediction, RecordInput, StayCategory, UnknownClassError, ValidationError,
};
use crate::pipeline::{FeaturePipeline, FeatureVector, Validator};

/// Request-scoped prediction errors.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("presentation failed: {0}")]
    UnknownClass(#[from] UnknownClassError),
}

pub type PredictResult<T> = Result<T, PredictError>;

/// The prediction service.
///
/// Holds the immutable artifact context behind an `Arc`: nothing writes
/// after load, so it is shared across threads with no locking, and every
/// request's record and vector stay stack-local.
#[derive(Debug)]
pub struct Predictor {
    ctx: Arc<PredictionContext>,
}

impl Predictor {
    pub fn new(ctx: Arc<PredictionContext>) -> Self {
        Self { ctx }
    }

    /// Load a bundle directory and wrap it.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        Ok(Self::new(Arc::new(PredictionContext::load(dir)?)))
    }

    /// The shared artifact context.
    pub fn context(&self) -> &PredictionContext {
        &self.ctx
    }

    /// Validate a raw submission and predict.
    pub fn predict(&self, input: &RecordInput) -> PredictResult<Prediction> {
        let record = Validator::new(&self.ctx.reference).validate(input)?;
        self.predict_record(&record)
    }

    /// Predict for an already-typed record.
    ///
    /// No reference-list check here: an off-list doctor or hospital is
    /// covered by the target encoder's trained fallback.
    pub fn predict_record(&self, record: &PatientRecord) -> PredictResult<Prediction> {
        let features = FeaturePipeline::new(&self.ctx).transform(record);
        let code = self.infer(&features)?;
        let category = StayCategory::from_code(code)?;
        log::debug!("predicted class {} ({})", code, category.label());
        Ok(Prediction::new(category))
    }

    /// Run the classifier on an aligned feature vector.
    ///
    /// The shape check should be unreachable after reindexing; it fires
    /// only if the loaded artifacts have drifted apart.
    fn infer(&self, features: &FeatureVector) -> Result<u32, InferenceError> {
        let values: Vec<f64> = features.values().collect();
        let expected = self.ctx.classifier.n_features();
        if values.len() != expected {
            return Err(InferenceError {
                expected,
                found: values.len(),
            });
        }
        Ok(self.ctx.classifier.predict(&values))
    }
}
