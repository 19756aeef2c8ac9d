//! Doctor and hospital reference lists.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Minimum similarity for a did-you-mean suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// The two lookup lists an entry form is populated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReferenceLists {
    pub doctors: Vec<String>,
    pub hospitals: Vec<String>,
}

impl ReferenceLists {
    pub fn new(doctors: Vec<String>, hospitals: Vec<String>) -> Self {
        Self { doctors, hospitals }
    }

    pub fn contains_doctor(&self, name: &str) -> bool {
        self.doctors.iter().any(|d| d == name)
    }

    pub fn contains_hospital(&self, name: &str) -> bool {
        self.hospitals.iter().any(|h| h == name)
    }

    /// Closest doctor to a misspelled name, if any is close enough.
    pub fn suggest_doctor(&self, name: &str) -> Option<String> {
        closest(name, &self.doctors)
    }

    /// Closest hospital to a misspelled name, if any is close enough.
    pub fn suggest_hospital(&self, name: &str) -> Option<String> {
        closest(name, &self.hospitals)
    }
}

/// Best fuzzy match above the suggestion threshold.
fn closest(query: &str, names: &[String]) -> Option<String> {
    let query_lower = query.to_lowercase();
    names
        .iter()
        .map(|name| (name, jaro_winkler(&query_lower, &name.to_lowercase())))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .map(|(name, _)| name.clone())
}
