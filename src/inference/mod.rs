//! Inference artifacts: the preprocessing pipeline and the placement model.
//!
//! Both are opaque to the rest of the crate and reached only through the
//! [`Transformer`] and [`Classifier`] capability traits, so the prediction
//! gate can run against real artifacts or deterministic test stubs.
//!
//! ```text
//!   StudentProfile ──▶ Transformer ──▶ FeatureVector ──▶ Classifier ──▶ label (+ proba)
//! ```

mod artifacts;
mod model;
mod pipeline;

pub use artifacts::*;
pub use model::*;
pub use pipeline::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::types::StudentProfile;

/// Transformed model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Feature preprocessing applied before classification.
pub trait Transformer: Send + Sync {
    fn transform(&self, profile: &StudentProfile) -> Result<FeatureVector, InferenceError>;
}

/// Trained classifier.
pub trait Classifier: Send + Sync {
    /// Predict the class label for one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError>;

    /// Per-class probabilities, or `Ok(None)` when the model has no
    /// probability interface.
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<Vec<f64>>, InferenceError> {
        Ok(None)
    }

    /// Whether [`Classifier::predict_proba`] can return probabilities.
    fn supports_proba(&self) -> bool {
        false
    }

    /// Class labels in probability-row order, if known.
    fn classes(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Artifact I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Artifact parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Shape mismatch in {stage}: expected {expected} values, got {got}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Pipeline column {index} is '{found}', expected '{expected}'")]
    ColumnMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Model returned probability {0} outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Positive class index {index} not present in {classes} class probabilities")]
    MissingPositiveClass { index: usize, classes: usize },

    #[error("Artifact unavailable ({}): {reason}", .path.display())]
    Unavailable { path: PathBuf, reason: String },
}
