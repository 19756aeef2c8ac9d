//! End-to-end tests against an on-disk artifact bundle.
//!
//! The bundle is a small hand-built forest whose votes are easy to trace,
//! exported through the same JSON shapes a training run would produce.

use std::fs;
use std::path::Path;

use serde_json::json;
use stay_predict_core::artifacts::{hash_data, ArtifactError, Manifest, MANIFEST_FILE};
use stay_predict_core::{
    AdmissionType, BloodType, Gender, InsuranceProvider, MedicalCondition, Medication,
    PatientRecord, PredictError, Predictor, RecordInput, StayCategory, TestResult,
    ValidationError,
};

fn categorical_fields() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Gender", vec!["Female", "Male"]),
        (
            "Blood Type",
            vec!["A+", "A-", "AB+", "AB-", "B+", "B-", "O+", "O-"],
        ),
        (
            "Medical Condition",
            vec!["Asthma", "Cancer", "Diabetes", "Hypertension", "Obesity"],
        ),
        (
            "Insurance Provider",
            vec!["Blue Cross", "Cigna", "Medicare", "UnitedHealthcare"],
        ),
        ("Admission Type", vec!["Elective", "Emergency", "Urgent"]),
        (
            "Medication",
            vec!["Ibuprofen", "Lipitor", "Paracetamol", "Penicillin"],
        ),
        ("Test Results", vec!["Abnormal", "Inconclusive", "Normal"]),
    ]
}

fn schema_columns() -> Vec<String> {
    let mut columns = vec![
        "Age".to_string(),
        "Billing Amount".to_string(),
        "Doctor".to_string(),
        "Hospital".to_string(),
    ];
    for (field, categories) in categorical_fields() {
        for category in categories {
            columns.push(format!("{}_{}", field, category));
        }
    }
    columns
}

/// Write a complete, checksummed bundle into `dir`.
///
/// Forest logic, over scaled/encoded features:
/// - tree 0: scaled Age <= 0.0 → class 0, else class 2
/// - tree 1: Medical Condition_Diabetes set → class 0, else class 1
/// - tree 2: Admission Type_Emergency set → class 2, else class 0
fn write_bundle(dir: &Path) {
    let schema = schema_columns();
    let feature_index =
        |name: &str| schema.iter().position(|c| c == name).expect("schema column");

    let classifier = json!({
        "n_features": schema.len(),
        "classes": [0, 1, 2],
        "trees": [
            {"nodes": [
                {"feature": feature_index("Age"), "threshold": 0.0, "left": 1, "right": 2},
                {"leaf": 0},
                {"leaf": 2}
            ]},
            {"nodes": [
                {"feature": feature_index("Medical Condition_Diabetes"), "threshold": 0.5, "left": 1, "right": 2},
                {"leaf": 1},
                {"leaf": 0}
            ]},
            {"nodes": [
                {"feature": feature_index("Admission Type_Emergency"), "threshold": 0.5, "left": 1, "right": 2},
                {"leaf": 0},
                {"leaf": 2}
            ]}
        ]
    });

    let target_encoder = json!({
        "Doctor": {
            "mapping": {"Dr. Smith": 1.2, "Dr. Jones": 0.8},
            "fallback": 1.0
        },
        "Hospital": {
            "mapping": {"General Hospital": 1.5, "City Clinic": 0.5},
            "fallback": 1.0
        }
    });

    let one_hot = json!({
        "fields": categorical_fields()
            .iter()
            .map(|(name, categories)| json!({"name": name, "categories": categories}))
            .collect::<Vec<_>>()
    });

    let scaler = json!({
        "Age": {"center": 50.0, "scale": 10.0},
        "Billing Amount": {"center": 10000.0, "scale": 5000.0}
    });

    let files = [
        ("classifier.json", classifier),
        ("target_encoder.json", target_encoder),
        ("one_hot.json", one_hot),
        ("scaler.json", scaler),
        ("train_columns.json", json!(schema)),
        ("doctor.json", json!(["Dr. Jones", "Dr. Smith"])),
        ("hospital.json", json!(["City Clinic", "General Hospital"])),
    ];

    let mut manifest = Manifest::default();
    for (name, value) in files {
        let bytes = serde_json::to_vec_pretty(&value).unwrap();
        fs::write(dir.join(name), &bytes).unwrap();
        manifest.insert(name, &bytes);
    }
    fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_vec_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

/// Replace one artifact's content and re-record its digest.
fn rewrite_artifact(dir: &Path, name: &str, value: serde_json::Value) {
    let bytes = serde_json::to_vec_pretty(&value).unwrap();
    fs::write(dir.join(name), &bytes).unwrap();

    let manifest_bytes = fs::read(dir.join(MANIFEST_FILE)).unwrap();
    let mut manifest: Manifest = serde_json::from_slice(&manifest_bytes).unwrap();
    manifest.artifacts.insert(name.to_string(), hash_data(&bytes));
    fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_vec_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

fn golden_input() -> RecordInput {
    RecordInput {
        age: 45,
        billing_amount: 12000.0,
        doctor: "Dr. Smith".into(),
        hospital: "General Hospital".into(),
        gender: "Male".into(),
        blood_type: "O+".into(),
        medical_condition: "Diabetes".into(),
        insurance_provider: "Medicare".into(),
        admission_type: "Emergency".into(),
        medication: "Ibuprofen".into(),
        test_results: "Abnormal".into(),
    }
}

#[test]
fn test_golden_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let predictor = Predictor::load(dir.path()).unwrap();

    // Votes: age 45 → -0.5 → 0; diabetes → 0; emergency → 2. Majority 0.
    let prediction = predictor.predict(&golden_input()).unwrap();
    assert_eq!(prediction.category, StayCategory::Short);
    assert_eq!(prediction.label(), "stay duration: up to 2 days");

    // Deterministic for a fixed bundle and input
    for _ in 0..5 {
        assert_eq!(
            predictor.predict(&golden_input()).unwrap().category,
            StayCategory::Short
        );
    }
}

#[test]
fn test_long_stay_majority() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    // Votes: age 70 → 2.0 → 2; diabetes → 0; emergency → 2. Majority 2.
    let mut input = golden_input();
    input.age = 70;
    let prediction = predictor.predict(&input).unwrap();
    assert_eq!(prediction.category, StayCategory::Long);
    assert_eq!(prediction.label(), "stay duration: more than 6 days");
}

#[test]
fn test_vote_tie_breaks_toward_lowest_class() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    // Votes: age 70 → 2; no diabetes → 1; elective → 0. Tie → class 0.
    let mut input = golden_input();
    input.age = 70;
    input.medical_condition = "Cancer".into();
    input.admission_type = "Elective".into();

    let prediction = predictor.predict(&input).unwrap();
    assert_eq!(prediction.category, StayCategory::Short);
}

#[test]
fn test_age_bounds_rejected_before_transformation() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    for age in [-1, 121] {
        let mut input = golden_input();
        input.age = age;
        let err = predictor.predict(&input).unwrap_err();
        assert!(matches!(
            err,
            PredictError::Validation(ValidationError::AgeOutOfRange(a)) if a == age
        ));
    }
}

#[test]
fn test_misspelled_doctor_gets_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    let mut input = golden_input();
    input.doctor = "Dr. Smth".into();

    match predictor.predict(&input).unwrap_err() {
        PredictError::Validation(ValidationError::UnknownDoctor { name, suggestion }) => {
            assert_eq!(name, "Dr. Smth");
            assert_eq!(suggestion.as_deref(), Some("Dr. Smith"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unseen_names_use_trained_fallback() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    // Typed path: off-list names are not an error, the encoder falls back
    let record = PatientRecord {
        age: 45,
        billing_amount: 12000.0,
        doctor: "Dr. Nobody".into(),
        hospital: "Pop-up Clinic".into(),
        gender: Gender::Male,
        blood_type: BloodType::OPositive,
        medical_condition: MedicalCondition::Diabetes,
        insurance_provider: InsuranceProvider::Medicare,
        admission_type: AdmissionType::Emergency,
        medication: Medication::Ibuprofen,
        test_results: TestResult::Abnormal,
    };

    let prediction = predictor.predict_record(&record).unwrap();
    assert_eq!(prediction.category, StayCategory::Short);
}

#[test]
fn test_tampered_artifact_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    // Flip bytes without updating the manifest
    fs::write(
        dir.path().join("scaler.json"),
        br#"{"Age":{"center":0.0,"scale":1.0},"Billing Amount":{"center":0.0,"scale":1.0}}"#,
    )
    .unwrap();

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::ChecksumMismatch(f) if f == "scaler.json"));
}

#[test]
fn test_missing_artifact_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    fs::remove_file(dir.path().join("hospital.json")).unwrap();

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Missing(f) if f == "hospital.json"));
}

#[test]
fn test_missing_manifest_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    fs::remove_file(dir.path().join(MANIFEST_FILE)).unwrap();

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Missing(f) if f == MANIFEST_FILE));
}

#[test]
fn test_structurally_corrupt_classifier_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    // Child index points past the node array
    rewrite_artifact(
        dir.path(),
        "classifier.json",
        json!({
            "n_features": schema_columns().len(),
            "classes": [0, 1, 2],
            "trees": [
                {"nodes": [
                    {"feature": 0, "threshold": 0.0, "left": 1, "right": 9},
                    {"leaf": 0}
                ]}
            ]
        }),
    );

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Corrupt(f, _) if f == "classifier.json"));
}

#[test]
fn test_feature_width_drift_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    // Structurally valid forest trained on a different width
    rewrite_artifact(
        dir.path(),
        "classifier.json",
        json!({
            "n_features": 5,
            "classes": [0, 1, 2],
            "trees": [{"nodes": [{"leaf": 0}]}]
        }),
    );

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::SchemaMismatch { expected: 5, found } if found == schema_columns().len()
    ));
}

#[test]
fn test_unparsable_artifact_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let bytes = b"not json at all";
    fs::write(dir.path().join("doctor.json"), bytes).unwrap();
    let manifest_bytes = fs::read(dir.path().join(MANIFEST_FILE)).unwrap();
    let mut manifest: Manifest = serde_json::from_slice(&manifest_bytes).unwrap();
    manifest.artifacts.insert("doctor.json".to_string(), hash_data(bytes));
    fs::write(
        dir.path().join(MANIFEST_FILE),
        serde_json::to_vec_pretty(&manifest).unwrap(),
    )
    .unwrap();

    let err = Predictor::load(dir.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Json(f, _) if f == "doctor.json"));
}
