//! Career Path Predictor
//!
//! Collects a thirteen-field student profile, refuses the degenerate
//! all-zero and all-maximum profiles, and otherwise runs a fitted
//! preprocessing pipeline and binary classifier to predict placement.
//!
//! ## Architecture
//!
//! - **Collector**: Form submissions and CLI flags, both bounded per field
//! - **Gate**: Validation gate in front of the transformer and classifier
//! - **Inference**: JSON-serialized scaler pipeline and linear classifier
//! - **API**: Axum server with the form page and JSON endpoints

pub mod api;
pub mod collector;
pub mod config;
pub mod gate;
pub mod inference;
pub mod render;
pub mod types;

// Re-export configuration
pub use config::PredictorConfig;

// Re-export commonly used types
pub use types::{FieldSpec, Outcome, ProfileError, RejectReason, StudentProfile, FIELD_SPECS};

// Re-export the gate and its collaborators
pub use collector::{CliControls, FormSubmission, ProfileCollector};
pub use gate::{GateError, GateState, PredictionGate};
pub use inference::{Artifacts, Classifier, FeatureVector, InferenceError, Transformer};
pub use render::{render, render_failure, Rendered, Severity};
