//! Trained feature encoders and the numeric scaler.
//!
//! All three are opaque fit-time artifacts: the code mappings, category
//! lists, and scale parameters are data loaded from the bundle, never
//! derived here. Unseen values are handled by trained fallbacks, not
//! errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Learned target encoding for one high-cardinality column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnEncoding {
    /// Raw value → learned numeric code.
    pub mapping: HashMap<String, f64>,
    /// Trained code for values unseen at fit time (the global mean).
    pub fallback: f64,
}

impl ColumnEncoding {
    /// Encode one value. Unseen values take the trained fallback.
    pub fn encode(&self, value: &str) -> f64 {
        self.mapping.get(value).copied().unwrap_or(self.fallback)
    }
}

/// Target encoder over the doctor and hospital columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetEncoder {
    #[serde(rename = "Doctor")]
    pub doctor: ColumnEncoding,
    #[serde(rename = "Hospital")]
    pub hospital: ColumnEncoding,
}

/// One categorical field known to the one-hot encoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OneHotField {
    /// Training-time column name (e.g. "Blood Type").
    pub name: String,
    /// Known categories, in training order.
    pub categories: Vec<String>,
}

/// One-hot encoder over the low-cardinality categorical fields.
///
/// The encoder knows its full output column set up front, so the
/// indicator block it emits has the same width for every input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OneHotEncoder {
    pub fields: Vec<OneHotField>,
}

impl OneHotEncoder {
    /// Every output column name, in encoder order.
    pub fn output_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|field| {
                field
                    .categories
                    .iter()
                    .map(move |category| indicator_column(&field.name, category))
            })
            .collect()
    }

    /// Produce one indicator per known field/category pair.
    ///
    /// `values` pairs field names with the record's raw value. A value
    /// matching no known category yields an all-zero block for that
    /// field, as does a field with no supplied value.
    pub fn transform(&self, values: &[(&str, &str)]) -> Vec<(String, f64)> {
        self.fields
            .iter()
            .flat_map(|field| {
                let value = values
                    .iter()
                    .find(|(name, _)| *name == field.name)
                    .map(|(_, v)| *v);
                field.categories.iter().map(move |category| {
                    let hit = value == Some(category.as_str());
                    (
                        indicator_column(&field.name, category),
                        if hit { 1.0 } else { 0.0 },
                    )
                })
            })
            .collect()
    }
}

/// Indicator column name for a field/category pair.
pub fn indicator_column(field: &str, category: &str) -> String {
    format!("{}_{}", field, category)
}

/// Affine scale parameters for one numeric column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScaleParams {
    pub center: f64,
    pub scale: f64,
}

impl ScaleParams {
    /// Apply the trained scaling. A zero scale degrades to centering.
    pub fn apply(&self, value: f64) -> f64 {
        if self.scale == 0.0 {
            value - self.center
        } else {
            (value - self.center) / self.scale
        }
    }
}

/// Numeric scaler over the age and billing-amount columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scaler {
    #[serde(rename = "Age")]
    pub age: ScaleParams,
    #[serde(rename = "Billing Amount")]
    pub billing_amount: ScaleParams,
}

impl Scaler {
    /// Structural soundness of the fit parameters.
    pub fn validate(&self) -> Result<(), String> {
        for (name, params) in [("Age", self.age), ("Billing Amount", self.billing_amount)] {
            if !params.center.is_finite() || !params.scale.is_finite() {
                return Err(format!("non-finite scale parameters for {}", name));
            }
        }
        Ok(())
    }
}
