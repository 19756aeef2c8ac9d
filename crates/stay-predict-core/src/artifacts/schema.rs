//! Training-time column layout.

use serde::{Deserialize, Serialize};

/// The ordered sequence of column names the classifier was trained on.
///
/// Fixed at training time and loaded as a constant artifact; the feature
/// pipeline's final alignment step rewrites every row to this layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names in training order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
