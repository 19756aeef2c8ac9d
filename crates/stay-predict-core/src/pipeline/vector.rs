//! Ordered feature vectors.

use indexmap::IndexMap;
use serde::Serialize;

use crate::artifacts::TrainingSchema;

/// An ordered mapping from column name to numeric value.
///
/// Column order is insertion order until [`FeatureVector::reindex`]
/// rewrites it to the training schema's layout.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct FeatureVector {
    columns: IndexMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a column. Overwriting keeps the column's
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.columns.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Rewrite to the training schema's layout: schema order, missing
    /// columns filled with 0.0, columns outside the schema dropped.
    pub fn reindex(&self, schema: &TrainingSchema) -> FeatureVector {
        let columns = schema
            .columns()
            .iter()
            .map(|name| (name.clone(), self.get(name).unwrap_or(0.0)))
            .collect();
        FeatureVector { columns }
    }
}
