//! Boundary validation of submitted records.

use crate::artifacts::ReferenceLists;
use crate::models::{PatientRecord, RecordInput, ValidationError, MAX_AGE};

/// Validates raw submissions against the field domains and the loaded
/// reference lists, producing a typed record.
pub struct Validator<'a> {
    reference: &'a ReferenceLists,
}

impl<'a> Validator<'a> {
    pub fn new(reference: &'a ReferenceLists) -> Self {
        Self { reference }
    }

    /// Check every field and build a [`PatientRecord`].
    ///
    /// The first violation is reported and nothing downstream runs on a
    /// rejected record. Off-list doctor and hospital names carry a
    /// closest-match suggestion when one is close enough.
    pub fn validate(&self, input: &RecordInput) -> Result<PatientRecord, ValidationError> {
        let age = u8::try_from(input.age)
            .ok()
            .filter(|age| *age <= MAX_AGE)
            .ok_or(ValidationError::AgeOutOfRange(input.age))?;

        if !input.billing_amount.is_finite() || input.billing_amount < 0.0 {
            return Err(ValidationError::InvalidBillingAmount(input.billing_amount));
        }

        if !self.reference.contains_doctor(&input.doctor) {
            return Err(ValidationError::UnknownDoctor {
                name: input.doctor.clone(),
                suggestion: self.reference.suggest_doctor(&input.doctor),
            });
        }

        if !self.reference.contains_hospital(&input.hospital) {
            return Err(ValidationError::UnknownHospital {
                name: input.hospital.clone(),
                suggestion: self.reference.suggest_hospital(&input.hospital),
            });
        }

        Ok(PatientRecord {
            age,
            billing_amount: input.billing_amount,
            doctor: input.doctor.clone(),
            hospital: input.hospital.clone(),
            gender: input.gender.parse()?,
            blood_type: input.blood_type.parse()?,
            medical_condition: input.medical_condition.parse()?,
            insurance_provider: input.insurance_provider.parse()?,
            admission_type: input.admission_type.parse()?,
            medication: input.medication.parse()?,
            test_results: input.test_results.parse()?,
        })
    }
}
