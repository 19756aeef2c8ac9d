//! Patient encounter records and their field domains.
//!
//! A [`RecordInput`] is what the boundary hands us (numbers and raw
//! strings from a form, CLI, or API request). Validation turns it into a
//! [`PatientRecord`], whose categorical fields are closed enums so a bad
//! value cannot reach the feature pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive upper bound for patient age.
pub const MAX_AGE: u8 = 120;

/// Validation errors for a submitted record.
///
/// Recoverable and request-scoped: the caller is told what was wrong and
/// no partial prediction is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("age {0} is out of range (0-120)")]
    AgeOutOfRange(i64),

    #[error("billing amount {0} must be a finite, non-negative number")]
    InvalidBillingAmount(f64),

    #[error("unknown doctor: {name}")]
    UnknownDoctor {
        name: String,
        /// Closest reference-list entry, if any is close enough.
        suggestion: Option<String>,
    },

    #[error("unknown hospital: {name}")]
    UnknownHospital {
        name: String,
        suggestion: Option<String>,
    },

    #[error("invalid value {value:?} for {field}")]
    UnknownCategory { field: &'static str, value: String },
}

impl ValidationError {
    /// The did-you-mean suggestion, when one exists.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ValidationError::UnknownDoctor { suggestion, .. }
            | ValidationError::UnknownHospital { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

/// Patient gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "gender",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ABO/Rh blood type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl FromStr for BloodType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "blood type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary medical condition for the encounter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MedicalCondition {
    Asthma,
    Cancer,
    Diabetes,
    Hypertension,
    Obesity,
}

impl MedicalCondition {
    pub const ALL: [MedicalCondition; 5] = [
        MedicalCondition::Asthma,
        MedicalCondition::Cancer,
        MedicalCondition::Diabetes,
        MedicalCondition::Hypertension,
        MedicalCondition::Obesity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedicalCondition::Asthma => "Asthma",
            MedicalCondition::Cancer => "Cancer",
            MedicalCondition::Diabetes => "Diabetes",
            MedicalCondition::Hypertension => "Hypertension",
            MedicalCondition::Obesity => "Obesity",
        }
    }
}

impl FromStr for MedicalCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "medical condition",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for MedicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insurance provider billed for the encounter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InsuranceProvider {
    #[serde(rename = "Blue Cross")]
    BlueCross,
    Cigna,
    Medicare,
    UnitedHealthcare,
}

impl InsuranceProvider {
    pub const ALL: [InsuranceProvider; 4] = [
        InsuranceProvider::BlueCross,
        InsuranceProvider::Cigna,
        InsuranceProvider::Medicare,
        InsuranceProvider::UnitedHealthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceProvider::BlueCross => "Blue Cross",
            InsuranceProvider::Cigna => "Cigna",
            InsuranceProvider::Medicare => "Medicare",
            InsuranceProvider::UnitedHealthcare => "UnitedHealthcare",
        }
    }
}

impl FromStr for InsuranceProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "insurance provider",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for InsuranceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the patient was admitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AdmissionType {
    Emergency,
    Urgent,
    Elective,
}

impl AdmissionType {
    pub const ALL: [AdmissionType; 3] = [
        AdmissionType::Emergency,
        AdmissionType::Urgent,
        AdmissionType::Elective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionType::Emergency => "Emergency",
            AdmissionType::Urgent => "Urgent",
            AdmissionType::Elective => "Elective",
        }
    }
}

impl FromStr for AdmissionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "admission type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for AdmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Medication prescribed during the stay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Medication {
    Ibuprofen,
    Lipitor,
    Paracetamol,
    Penicillin,
}

impl Medication {
    pub const ALL: [Medication; 4] = [
        Medication::Ibuprofen,
        Medication::Lipitor,
        Medication::Paracetamol,
        Medication::Penicillin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medication::Ibuprofen => "Ibuprofen",
            Medication::Lipitor => "Lipitor",
            Medication::Paracetamol => "Paracetamol",
            Medication::Penicillin => "Penicillin",
        }
    }
}

impl FromStr for Medication {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "medication",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the admission test panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TestResult {
    Inconclusive,
    Normal,
    Abnormal,
}

impl TestResult {
    pub const ALL: [TestResult; 3] = [
        TestResult::Inconclusive,
        TestResult::Normal,
        TestResult::Abnormal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestResult::Inconclusive => "Inconclusive",
            TestResult::Normal => "Normal",
            TestResult::Abnormal => "Abnormal",
        }
    }
}

impl FromStr for TestResult {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: "test results",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient encounter as submitted at the boundary, before validation.
///
/// Everything a form or API request can physically hand over: free
/// strings and signed numbers. `age` is signed so out-of-range input is
/// representable and rejectable rather than silently coerced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordInput {
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

/// A validated patient encounter, ready for the feature pipeline.
///
/// Doctor and hospital stay as strings: their domains are data
/// (reference lists loaded with the artifacts), not code. A value the
/// target encoder never saw falls back to the trained default code, so
/// constructing a record directly with an off-list name is allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub age: u8,
    pub billing_amount: f64,
    pub doctor: String,
    pub hospital: String,
    pub gender: Gender,
    pub blood_type: BloodType,
    pub medical_condition: MedicalCondition,
    pub insurance_provider: InsuranceProvider,
    pub admission_type: AdmissionType,
    pub medication: Medication,
    pub test_results: TestResult,
}
