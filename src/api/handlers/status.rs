//! Liveness and artifact status endpoints

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::api::envelope::ApiResponse;
use crate::inference::ArtifactStatus;

use super::PredictorState;

// ============================================================================
// Health Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    /// Both artifacts loaded; when false every prediction fails
    pub artifacts_loaded: bool,
}

/// GET /health - Liveness check
///
/// The process stays up with missing artifacts, so this reports `ok` either
/// way and exposes artifact readiness separately.
pub async fn health_check(State(state): State<PredictorState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.started_at.elapsed().as_secs(),
        artifacts_loaded: state.artifacts.all_loaded(),
    })
}

// ============================================================================
// Model Status Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub ready: bool,
    pub pipeline: ArtifactStatus,
    pub model: ArtifactStatus,
    pub classes: Vec<String>,
    pub supports_probability: bool,
    pub positive_class_index: usize,
}

/// GET /api/v1/model - Artifact load status and classifier capabilities
pub async fn get_model_status(State(state): State<PredictorState>) -> Response {
    let classifier = &state.artifacts.classifier;
    ApiResponse::ok(ModelStatusResponse {
        ready: state.artifacts.all_loaded(),
        pipeline: state.artifacts.pipeline_status.clone(),
        model: state.artifacts.model_status.clone(),
        classes: classifier.classes(),
        supports_probability: classifier.supports_proba(),
        positive_class_index: state.positive_class_index,
    })
}
