//! Command-line host for the stay-predict core.
//!
//! Plays the input-collector role: gathers the eleven form fields as
//! flags, hands them to the library, prints the display label.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use stay_predict_core::{
    AdmissionType, BloodType, Gender, InsuranceProvider, MedicalCondition, Medication,
    PredictError, Predictor, RecordInput, TestResult,
};

#[derive(Parser)]
#[command(name = "stay-predict")]
#[command(author, version, about = "Hospital length-of-stay prediction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the stay category for one patient encounter
    Predict {
        /// Artifact bundle directory
        #[arg(long)]
        artifacts: PathBuf,
        #[command(flatten)]
        record: RecordArgs,
        /// Emit the full prediction as JSON instead of the label
        #[arg(long)]
        json: bool,
    },
    /// List the valid values for every form field
    Options {
        /// Artifact bundle directory
        #[arg(long)]
        artifacts: PathBuf,
    },
    /// Load a bundle and print a summary (doubles as an integrity check)
    Inspect {
        /// Artifact bundle directory
        #[arg(long)]
        artifacts: PathBuf,
    },
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long)]
    age: i64,
    #[arg(long)]
    billing_amount: f64,
    #[arg(long)]
    doctor: String,
    #[arg(long)]
    hospital: String,
    #[arg(long)]
    gender: String,
    #[arg(long)]
    blood_type: String,
    #[arg(long)]
    medical_condition: String,
    #[arg(long)]
    insurance_provider: String,
    #[arg(long)]
    admission_type: String,
    #[arg(long)]
    medication: String,
    #[arg(long)]
    test_results: String,
}

impl From<RecordArgs> for RecordInput {
    fn from(args: RecordArgs) -> Self {
        RecordInput {
            age: args.age,
            billing_amount: args.billing_amount,
            doctor: args.doctor,
            hospital: args.hospital,
            gender: args.gender,
            blood_type: args.blood_type,
            medical_condition: args.medical_condition,
            insurance_provider: args.insurance_provider,
            admission_type: args.admission_type,
            medication: args.medication,
            test_results: args.test_results,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Predict {
            artifacts,
            record,
            json,
        } => {
            let predictor = load(&artifacts)?;
            let input: RecordInput = record.into();
            match predictor.predict(&input) {
                Ok(prediction) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&prediction)?);
                    } else {
                        println!("{}", prediction.label());
                    }
                    Ok(())
                }
                Err(err) => {
                    if let PredictError::Validation(validation) = &err {
                        if let Some(suggestion) = validation.suggestion() {
                            eprintln!("hint: did you mean {:?}?", suggestion);
                        }
                    }
                    Err(err.into())
                }
            }
        }
        Commands::Options { artifacts } => {
            let predictor = load(&artifacts)?;
            let reference = &predictor.context().reference;

            print_group("doctor", reference.doctors.iter().map(String::as_str));
            print_group("hospital", reference.hospitals.iter().map(String::as_str));
            print_group("gender", Gender::ALL.iter().map(|v| v.as_str()));
            print_group("blood-type", BloodType::ALL.iter().map(|v| v.as_str()));
            print_group(
                "medical-condition",
                MedicalCondition::ALL.iter().map(|v| v.as_str()),
            );
            print_group(
                "insurance-provider",
                InsuranceProvider::ALL.iter().map(|v| v.as_str()),
            );
            print_group(
                "admission-type",
                AdmissionType::ALL.iter().map(|v| v.as_str()),
            );
            print_group("medication", Medication::ALL.iter().map(|v| v.as_str()));
            print_group("test-results", TestResult::ALL.iter().map(|v| v.as_str()));
            Ok(())
        }
        Commands::Inspect { artifacts } => {
            let predictor = load(&artifacts)?;
            let ctx = predictor.context();

            println!("bundle OK: {}", artifacts.display());
            println!("  features: {}", ctx.classifier.n_features());
            println!("  training columns: {}", ctx.schema.len());
            println!("  one-hot columns: {}", ctx.one_hot.output_columns().len());
            println!(
                "  reference lists: {} doctors, {} hospitals",
                ctx.reference.doctors.len(),
                ctx.reference.hospitals.len()
            );
            Ok(())
        }
    }
}

fn load(artifacts: &Path) -> anyhow::Result<Predictor> {
    let predictor = Predictor::load(artifacts)
        .with_context(|| format!("loading artifact bundle from {}", artifacts.display()))?;
    log::info!("artifact bundle ready: {}", artifacts.display());
    Ok(predictor)
}

fn print_group<'a>(name: &str, values: impl Iterator<Item = &'a str>) {
    println!("{}:", name);
    for value in values {
        println!("  {}", value);
    }
}
