//! Decision-forest inference.
//!
//! Trees use an array layout: node 0 is the root, split nodes route
//! `value <= threshold` to the left child, and child indices always point
//! forward, so traversal terminates without cycle checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Feature-vector shape mismatch at inference time.
///
/// Should be unreachable when the vector was aligned against the same
/// schema the classifier was loaded with. Never truncated or padded
/// over; always surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("classifier expects {expected} features, got {found}")]
pub struct InferenceError {
    pub expected: usize,
    pub found: usize,
}

/// An opaque trained classifier: fixed-width feature vector in, one
/// class code out.
///
/// The forest below is the shipped implementation; other model families
/// can substitute without touching the pipeline.
pub trait Classifier: Send + Sync {
    /// Width of the feature vector the model was trained on.
    fn n_features(&self) -> usize;

    /// Class code for one vector of exactly `n_features` values.
    fn predict(&self, features: &[f64]) -> u32;
}

/// One node of a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: u32,
    },
}

/// A single decision tree in array layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf class.
    fn decide(&self, features: &[f64]) -> u32 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { leaf } => return *leaf,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Structural soundness: non-empty, children in bounds and strictly
    /// forward, feature indices within the trained width.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(format!(
                        "node {} splits on feature {} but the model has {}",
                        i, feature, n_features
                    ));
                }
                for child in [*left, *right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child index {}", i, child));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A trained random forest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forest {
    /// Width of the training feature vector.
    pub n_features: usize,
    /// Class codes the model can emit.
    pub classes: Vec<u32>,
    pub trees: Vec<Tree>,
}

impl Forest {
    /// Structural soundness of the whole ensemble.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.classes.is_empty() {
            return Err("forest declares no classes".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| format!("tree {}: {}", i, reason))?;
        }
        Ok(())
    }
}

impl Classifier for Forest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    /// Majority vote over tree decisions; ties break toward the lowest
    /// class code so a fixed artifact always yields a fixed answer.
    fn predict(&self, features: &[f64]) -> u32 {
        let mut votes: BTreeMap<u32, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.decide(features)).or_insert(0) += 1;
        }

        let mut best_class = 0;
        let mut best_count = 0;
        for (class, count) in votes {
            // Ascending class order, so strict > keeps the lowest on ties
            if count > best_count {
                best_class = class;
                best_count = count;
            }
        }
        best_class
    }
}
