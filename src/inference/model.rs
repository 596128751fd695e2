//! Placement model artifact.
//!
//! A fitted binary linear classifier exported as JSON:
//!
//! ```json
//! {
//!   "kind": "logistic_regression",
//!   "classes": ["Not Placed", "Placed"],
//!   "coef": [...13 weights...],
//!   "intercept": -0.42
//! }
//! ```
//!
//! `logistic_regression` exposes class probabilities through the sigmoid of
//! the decision function. `linear_svc` only has a decision function, so it
//! predicts labels without probabilities.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Classifier, FeatureVector, InferenceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    LinearSvc,
}

/// Fitted binary linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub kind: ModelKind,
    /// Class labels; index 1 is the class the decision function points to.
    pub classes: Vec<String>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Load and validate a model artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let bytes = std::fs::read(path).map_err(|source| InferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|source| InferenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.classes.len() != 2 {
            return Err(InferenceError::InvalidArtifact(format!(
                "linear model must have exactly 2 classes, got {}",
                self.classes.len()
            )));
        }
        if self.coef.is_empty() {
            return Err(InferenceError::InvalidArtifact("linear model has no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::InvalidArtifact(
                "linear model weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Signed distance from the separating hyperplane.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if features.len() != self.coef.len() {
            return Err(InferenceError::ShapeMismatch {
                stage: "model input",
                expected: self.coef.len(),
                got: features.len(),
            });
        }
        let dot: f64 = self
            .coef
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let decision = self.decision_function(features)?;
        let index = usize::from(decision > 0.0);
        self.classes
            .get(index)
            .cloned()
            .ok_or(InferenceError::MissingPositiveClass { index, classes: self.classes.len() })
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Option<Vec<f64>>, InferenceError> {
        match self.kind {
            ModelKind::LinearSvc => Ok(None),
            ModelKind::LogisticRegression => {
                let p = sigmoid(self.decision_function(features)?);
                Ok(Some(vec![1.0 - p, p]))
            }
        }
    }

    fn supports_proba(&self) -> bool {
        self.kind == ModelKind::LogisticRegression
    }

    fn classes(&self) -> Vec<String> {
        self.classes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn model(kind: ModelKind, intercept: f64) -> LinearModel {
        LinearModel {
            kind,
            classes: vec!["Not Placed".to_string(), "Placed".to_string()],
            coef: vec![0.0; 13],
            intercept,
        }
    }

    #[test]
    fn test_logistic_probability_follows_intercept() {
        let m = model(ModelKind::LogisticRegression, (0.82_f64 / 0.18).ln());
        let x = FeatureVector(vec![1.0; 13]);
        let proba = m.predict_proba(&x).unwrap().unwrap();
        assert!((proba[1] - 0.82).abs() < 1e-12);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert_eq!(m.predict(&x).unwrap(), "Placed");
    }

    #[test]
    fn test_negative_decision_predicts_first_class() {
        let m = model(ModelKind::LogisticRegression, -2.0);
        assert_eq!(m.predict(&FeatureVector(vec![0.0; 13])).unwrap(), "Not Placed");
    }

    #[test]
    fn test_linear_svc_has_no_probabilities() {
        let m = model(ModelKind::LinearSvc, 1.0);
        let x = FeatureVector(vec![0.0; 13]);
        assert!(m.predict_proba(&x).unwrap().is_none());
        assert!(!m.supports_proba());
        assert_eq!(m.predict(&x).unwrap(), "Placed");
    }

    #[test]
    fn test_shape_mismatch() {
        let m = model(ModelKind::LogisticRegression, 0.0);
        let err = m.predict(&FeatureVector(vec![0.0; 4])).unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch { expected: 13, got: 4, .. }));
    }

    #[test]
    fn test_validate_rejects_multiclass() {
        let mut m = model(ModelKind::LinearSvc, 0.0);
        m.classes.push("Maybe".to_string());
        assert!(matches!(m.validate(), Err(InferenceError::InvalidArtifact(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "kind": "linear_svc",
            "classes": ["No", "Yes"],
            "coef": [0.5, 0.5],
            "intercept": -1.0
        });
        write!(file, "{json}").unwrap();
        let m = LinearModel::load(file.path()).unwrap();
        assert_eq!(m.kind, ModelKind::LinearSvc);
        assert_eq!(m.classes(), vec!["No".to_string(), "Yes".to_string()]);
        assert_eq!(m.predict(&FeatureVector(vec![2.0, 2.0])).unwrap(), "Yes");
    }
}
