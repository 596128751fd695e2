//! API route handlers
//!
//! Request handling logic for all API endpoints including:
//! - Profile submission and prediction
//! - Form schema for the thirteen controls
//! - Liveness and artifact status

mod predict;
mod status;

pub use predict::*;
pub use status::*;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::gate::PredictionGate;
use crate::inference::Artifacts;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct PredictorState {
    /// The gate, behind a mutex so only one evaluation is in flight
    pub gate: Arc<Mutex<PredictionGate>>,
    /// Loaded artifacts, for status reporting
    pub artifacts: Artifacts,
    /// Positive-class index the gate reports
    pub positive_class_index: usize,
    pub started_at: Instant,
}

impl PredictorState {
    pub fn new(artifacts: Artifacts, positive_class_index: usize) -> Self {
        let gate = PredictionGate::from_artifacts(&artifacts).with_positive_class(positive_class_index);
        Self {
            gate: Arc::new(Mutex::new(gate)),
            artifacts,
            positive_class_index,
            started_at: Instant::now(),
        }
    }
}
