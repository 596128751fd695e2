//! Prediction and form-schema endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::collector::{FormSubmission, ProfileCollector};
use crate::render::{render, render_failure, Rendered};
use crate::types::{FieldSpec, Outcome, FIELD_SPECS};

use super::PredictorState;

// ============================================================================
// Predict Endpoint
// ============================================================================

/// Gate decision plus the message to show for it.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub outcome: Outcome,
    pub rendered: Rendered,
}

/// POST /api/v1/predict - Evaluate one form submission
///
/// Rejections and predictions are both 200; the body says which. An
/// out-of-range or malformed body is 400. A pipeline/model failure is 500
/// with a generic notice; the details go to the log only.
pub async fn predict(
    State(state): State<PredictorState>,
    payload: Result<Json<FormSubmission>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed prediction request");
            return ApiErrorResponse::bad_request(rejection.body_text());
        }
    };

    let profile = match form.collect() {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "Submission refused by input controls");
            return ApiErrorResponse::bad_request(e.to_string());
        }
    };

    let result = state.gate.lock().await.evaluate(&profile);

    match result {
        Ok(outcome) => {
            let rendered = render(&outcome);
            ApiResponse::ok(PredictionResponse { outcome, rendered })
        }
        Err(e) => {
            error!(error = %e, "Prediction attempt failed");
            ApiErrorResponse::model_failure(render_failure().message)
        }
    }
}

// ============================================================================
// Form Schema Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

/// GET /api/v1/form - The thirteen controls with ranges and defaults
pub async fn get_form() -> Response {
    ApiResponse::ok(FormSchema {
        fields: FIELD_SPECS.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{Artifacts, Classifier, FeatureVector, InferenceError, Transformer};
    use crate::types::StudentProfile;
    use axum::http::StatusCode;
    use std::sync::Arc;

    struct Identity;

    impl Transformer for Identity {
        fn transform(&self, profile: &StudentProfile) -> Result<FeatureVector, InferenceError> {
            Ok(FeatureVector(profile.to_row().to_vec()))
        }
    }

    struct Placed;

    impl Classifier for Placed {
        fn predict(&self, _features: &FeatureVector) -> Result<String, InferenceError> {
            Ok("Placed".to_string())
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<Vec<f64>>, InferenceError> {
            Ok(Some(vec![0.18, 0.82]))
        }
    }

    fn state() -> PredictorState {
        PredictorState::new(Artifacts::from_parts(Arc::new(Identity), Arc::new(Placed)), 1)
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_predict_scenario_c() {
        let form: FormSubmission = serde_json::from_value(serde_json::json!({
            "tenth": 85, "twelfth": 90, "cgpa": 8.5, "internships": 2, "projects": 5,
            "aptitude": 75, "soft_skills": 7, "leadership": 6, "extracurricular": 4,
            "certifications": 3, "backlogs": 0, "dsa": 60.0, "languages": 5
        }))
        .unwrap();
        let resp = predict(State(state()), Ok(Json(form))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let v = body_json(resp).await;
        assert_eq!(v["data"]["outcome"]["status"], "predicted");
        assert_eq!(v["data"]["outcome"]["label"], "Placed");
        assert_eq!(v["data"]["rendered"]["message"], "Prediction: Placed (Probability: 82.00%)");
    }

    #[tokio::test]
    async fn test_predict_empty_form_is_all_zero() {
        let resp = predict(State(state()), Ok(Json(FormSubmission::default()))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["data"]["outcome"]["status"], "rejected");
        assert_eq!(v["data"]["outcome"]["reason"], "all_zero");
        assert_eq!(v["data"]["rendered"]["severity"], "error");
    }

    #[tokio::test]
    async fn test_predict_out_of_range_is_bad_request() {
        let form = FormSubmission { cgpa: Some(11.0), ..Default::default() };
        let resp = predict(State(state()), Ok(Json(form))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let v = body_json(resp).await;
        assert!(v["error"]["message"].as_str().unwrap().contains("cgpa"));
    }

    #[tokio::test]
    async fn test_form_schema_lists_thirteen_fields() {
        let v = body_json(get_form().await).await;
        let fields = v["data"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[0]["name"], "tenth");
        assert_eq!(fields[4]["max"], 20.0);
        assert_eq!(fields[12]["column"], "Lang");
    }
}
