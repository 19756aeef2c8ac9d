//! Feature pipeline: validated record × trained artifacts → the exact
//! ordered feature vector the classifier was trained on.
//!
//! Transformation order is fixed and must mirror training-time
//! preprocessing exactly:
//!
//! assemble → target-encode → one-hot encode → scale → align to schema

mod validate;
mod vector;

pub use validate::*;
pub use vector::*;

use crate::artifacts::PredictionContext;
use crate::models::PatientRecord;

/// Training-time column names.
pub mod columns {
    pub const AGE: &str = "Age";
    pub const BILLING_AMOUNT: &str = "Billing Amount";
    pub const DOCTOR: &str = "Doctor";
    pub const HOSPITAL: &str = "Hospital";
    pub const GENDER: &str = "Gender";
    pub const BLOOD_TYPE: &str = "Blood Type";
    pub const MEDICAL_CONDITION: &str = "Medical Condition";
    pub const INSURANCE_PROVIDER: &str = "Insurance Provider";
    pub const ADMISSION_TYPE: &str = "Admission Type";
    pub const MEDICATION: &str = "Medication";
    pub const TEST_RESULTS: &str = "Test Results";
}

/// Deterministic, pure transformation of one record into a feature
/// vector aligned with the training schema.
pub struct FeaturePipeline<'a> {
    ctx: &'a PredictionContext,
}

impl<'a> FeaturePipeline<'a> {
    pub fn new(ctx: &'a PredictionContext) -> Self {
        Self { ctx }
    }

    /// Run the full transformation.
    ///
    /// Never fails: unseen doctor/hospital values take the target
    /// encoder's trained fallback code, unseen categories encode as
    /// all-zero indicator blocks, and the final alignment guarantees
    /// the output matches the training schema column-for-column.
    pub fn transform(&self, record: &PatientRecord) -> FeatureVector {
        let mut row = self.assemble(record);
        self.append_indicators(&mut row, record);
        self.scale_numerics(&mut row);
        row.reindex(&self.ctx.schema)
    }

    /// Raw numeric columns plus the target-encoded name columns.
    fn assemble(&self, record: &PatientRecord) -> FeatureVector {
        let mut row = FeatureVector::new();
        row.insert(columns::AGE, f64::from(record.age));
        row.insert(columns::BILLING_AMOUNT, record.billing_amount);
        row.insert(
            columns::DOCTOR,
            self.ctx.target_encoder.doctor.encode(&record.doctor),
        );
        row.insert(
            columns::HOSPITAL,
            self.ctx.target_encoder.hospital.encode(&record.hospital),
        );
        row
    }

    /// Append one indicator column per category the encoder knows.
    fn append_indicators(&self, row: &mut FeatureVector, record: &PatientRecord) {
        let values = [
            (columns::GENDER, record.gender.as_str()),
            (columns::BLOOD_TYPE, record.blood_type.as_str()),
            (columns::MEDICAL_CONDITION, record.medical_condition.as_str()),
            (columns::INSURANCE_PROVIDER, record.insurance_provider.as_str()),
            (columns::ADMISSION_TYPE, record.admission_type.as_str()),
            (columns::MEDICATION, record.medication.as_str()),
            (columns::TEST_RESULTS, record.test_results.as_str()),
        ];
        for (name, value) in self.ctx.one_hot.transform(&values) {
            row.insert(name, value);
        }
    }

    /// Replace the numeric columns with their scaled values in place.
    fn scale_numerics(&self, row: &mut FeatureVector) {
        if let Some(age) = row.get(columns::AGE) {
            row.insert(columns::AGE, self.ctx.scaler.age.apply(age));
        }
        if let Some(amount) = row.get(columns::BILLING_AMOUNT) {
            row.insert(
                columns::BILLING_AMOUNT,
                self.ctx.scaler.billing_amount.apply(amount),
            );
        }
    }
}
