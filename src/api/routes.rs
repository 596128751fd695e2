//! API route definitions
//!
//! - /api/v1/predict - Evaluate a form submission
//! - /api/v1/form    - Control table (labels, ranges, defaults)
//! - /api/v1/model   - Artifact load status
//! - /health         - Liveness

use axum::{routing::{get, post}, Router};

use super::handlers::{self, PredictorState};

/// Create all API routes
pub fn api_routes(state: PredictorState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/form", get(handlers::get_form))
        .route("/model", get(handlers::get_model_status))
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: PredictorState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
