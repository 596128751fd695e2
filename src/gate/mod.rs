//! Prediction gate
//!
//! Decides whether a submitted profile reaches the model at all, and if so
//! runs it through the pipeline and classifier exactly once.
//!
//! ## Evaluation order
//!
//! 1. `profile == StudentProfile::ZERO`    → `Rejected(AllZero)`
//! 2. `profile == StudentProfile::MAXIMUM` → `Rejected(AllMaximum)`
//! 3. otherwise transform, classify, and (if the model has one) read the
//!    positive-class probability
//!
//! Both rejections are exact record equality. Any other in-range profile,
//! however implausible, is passed to the model unmodified.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::inference::{Artifacts, Classifier, InferenceError, Transformer};
use crate::types::{to_percentage, Outcome, RejectReason, StudentProfile};

/// Default index of the positive class in a probability row.
pub const DEFAULT_POSITIVE_CLASS: usize = 1;

/// Gate lifecycle. A gate is `Evaluating` only while `evaluate` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Evaluating,
}

#[derive(Debug, Error)]
pub enum GateError {
    /// The pipeline or model call failed. Fatal to this submission only.
    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] InferenceError),
}

/// Runs the degenerate-input checks and the pipeline/model pair.
pub struct PredictionGate {
    transformer: Arc<dyn Transformer>,
    classifier: Arc<dyn Classifier>,
    positive_class: usize,
    state: GateState,
}

impl PredictionGate {
    pub fn new(transformer: Arc<dyn Transformer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            transformer,
            classifier,
            positive_class: DEFAULT_POSITIVE_CLASS,
            state: GateState::Idle,
        }
    }

    pub fn from_artifacts(artifacts: &Artifacts) -> Self {
        Self::new(artifacts.transformer.clone(), artifacts.classifier.clone())
    }

    /// Use a different probability-row index as the positive class.
    #[must_use]
    pub fn with_positive_class(mut self, index: usize) -> Self {
        self.positive_class = index;
        self
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Evaluate one submitted profile.
    ///
    /// Returns `Ok(Rejected)` for degenerate input without touching the
    /// artifacts. Pipeline/model failures are returned as
    /// [`GateError::ModelInvocation`]; the gate is back to `Idle` either way.
    pub fn evaluate(&mut self, profile: &StudentProfile) -> Result<Outcome, GateError> {
        self.state = GateState::Evaluating;
        let result = self.run(profile);
        self.state = GateState::Idle;
        result
    }

    fn run(&self, profile: &StudentProfile) -> Result<Outcome, GateError> {
        debug!(?profile, "Evaluating profile");

        if let Some(reason) = rejection(profile) {
            warn!(reason = %reason, "Degenerate profile rejected before inference");
            return Ok(Outcome::Rejected { reason });
        }

        let features = self.transformer.transform(profile)?;
        let label = self.classifier.predict(&features)?;

        let probability = match self.classifier.predict_proba(&features)? {
            Some(row) => Some(self.positive_probability(&row)?),
            None => None,
        };

        info!(label = %label, probability = ?probability, "Prediction complete");
        Ok(Outcome::Predicted { label, probability })
    }

    fn positive_probability(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let p = *row.get(self.positive_class).ok_or(InferenceError::MissingPositiveClass {
            index: self.positive_class,
            classes: row.len(),
        })?;
        if !(0.0..=1.0).contains(&p) {
            return Err(InferenceError::InvalidProbability(p));
        }
        Ok(to_percentage(p))
    }
}

/// Exact-equality degenerate-input check.
pub fn rejection(profile: &StudentProfile) -> Option<RejectReason> {
    if *profile == StudentProfile::ZERO {
        Some(RejectReason::AllZero)
    } else if *profile == StudentProfile::MAXIMUM {
        Some(RejectReason::AllMaximum)
    } else {
        None
    }
}
