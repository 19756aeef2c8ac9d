//! Prediction results and the class-code → label mapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The classifier emitted a class code with no display mapping.
///
/// Should be unreachable with a well-formed classifier artifact. Always
/// surfaced, never defaulted to one of the known labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("classifier returned unmapped class code: {0}")]
pub struct UnknownClassError(pub u32);

/// Predicted length-of-stay bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StayCategory {
    /// Class 0: discharged within two days.
    Short,
    /// Class 1: three to six days.
    Medium,
    /// Class 2: more than six days.
    Long,
}

impl StayCategory {
    /// Map a raw classifier code to a category.
    pub fn from_code(code: u32) -> Result<Self, UnknownClassError> {
        match code {
            0 => Ok(StayCategory::Short),
            1 => Ok(StayCategory::Medium),
            2 => Ok(StayCategory::Long),
            other => Err(UnknownClassError(other)),
        }
    }

    /// The raw class code this category was trained as.
    pub fn code(&self) -> u32 {
        match self {
            StayCategory::Short => 0,
            StayCategory::Medium => 1,
            StayCategory::Long => 2,
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            StayCategory::Short => "stay duration: up to 2 days",
            StayCategory::Medium => "stay duration: 3–6 days",
            StayCategory::Long => "stay duration: more than 6 days",
        }
    }
}

/// One completed prediction, as returned to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Request correlation id, generated per prediction.
    pub id: String,
    /// Predicted stay bucket.
    pub category: StayCategory,
    /// When the prediction was produced (RFC 3339).
    pub predicted_at: String,
}

impl Prediction {
    /// Wrap a category with fresh request metadata.
    pub fn new(category: StayCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            predicted_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Display label for the predicted category.
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}
