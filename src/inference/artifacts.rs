//! Startup loading of the pipeline/model pair.
//!
//! Artifacts are loaded once and shared read-only. A missing or corrupt
//! artifact does not stop the process: it is replaced by an
//! [`UnavailableArtifact`] whose every call fails, so each submission
//! reports a model invocation failure while the service stays up.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use super::{Classifier, FeatureVector, InferenceError, LinearModel, ScalerPipeline, Transformer};
use crate::types::StudentProfile;

/// Stand-in for an artifact that failed to load.
#[derive(Debug, Clone)]
pub struct UnavailableArtifact {
    pub path: PathBuf,
    pub reason: String,
}

impl UnavailableArtifact {
    fn error(&self) -> InferenceError {
        InferenceError::Unavailable {
            path: self.path.clone(),
            reason: self.reason.clone(),
        }
    }
}

impl Transformer for UnavailableArtifact {
    fn transform(&self, _profile: &StudentProfile) -> Result<FeatureVector, InferenceError> {
        Err(self.error())
    }
}

impl Classifier for UnavailableArtifact {
    fn predict(&self, _features: &FeatureVector) -> Result<String, InferenceError> {
        Err(self.error())
    }
}

/// Load status of one artifact, for reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtifactStatus {
    pub path: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The loaded pipeline/model pair.
#[derive(Clone)]
pub struct Artifacts {
    pub transformer: Arc<dyn Transformer>,
    pub classifier: Arc<dyn Classifier>,
    pub pipeline_status: ArtifactStatus,
    pub model_status: ArtifactStatus,
}

impl Artifacts {
    /// Load both artifacts, substituting unavailable stubs on failure.
    pub fn load(pipeline_path: &Path, model_path: &Path) -> Self {
        let (transformer, pipeline_status): (Arc<dyn Transformer>, _) =
            match ScalerPipeline::load(pipeline_path) {
                Ok(pipeline) => {
                    info!(
                        path = %pipeline_path.display(),
                        steps = pipeline.steps.len(),
                        "✓ Preprocessing pipeline loaded"
                    );
                    (Arc::new(pipeline), loaded(pipeline_path))
                }
                Err(e) => {
                    error!(path = %pipeline_path.display(), error = %e, "Failed to load preprocessing pipeline");
                    let status = failed(pipeline_path, &e);
                    (Arc::new(unavailable(pipeline_path, &e)), status)
                }
            };

        let (classifier, model_status): (Arc<dyn Classifier>, _) = match LinearModel::load(model_path) {
            Ok(model) => {
                info!(
                    path = %model_path.display(),
                    kind = ?model.kind,
                    classes = ?model.classes,
                    "✓ Placement model loaded"
                );
                (Arc::new(model), loaded(model_path))
            }
            Err(e) => {
                error!(path = %model_path.display(), error = %e, "Failed to load placement model");
                let status = failed(model_path, &e);
                (Arc::new(unavailable(model_path, &e)), status)
            }
        };

        Self {
            transformer,
            classifier,
            pipeline_status,
            model_status,
        }
    }

    /// Wrap already-constructed artifacts (tests, embedding).
    pub fn from_parts(transformer: Arc<dyn Transformer>, classifier: Arc<dyn Classifier>) -> Self {
        let in_memory = || ArtifactStatus {
            path: "<in-memory>".to_string(),
            loaded: true,
            error: None,
        };
        Self {
            transformer,
            classifier,
            pipeline_status: in_memory(),
            model_status: in_memory(),
        }
    }

    pub fn all_loaded(&self) -> bool {
        self.pipeline_status.loaded && self.model_status.loaded
    }
}

fn loaded(path: &Path) -> ArtifactStatus {
    ArtifactStatus {
        path: path.display().to_string(),
        loaded: true,
        error: None,
    }
}

fn failed(path: &Path, e: &InferenceError) -> ArtifactStatus {
    ArtifactStatus {
        path: path.display().to_string(),
        loaded: false,
        error: Some(e.to_string()),
    }
}

fn unavailable(path: &Path, e: &InferenceError) -> UnavailableArtifact {
    UnavailableArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_become_unavailable() {
        let artifacts = Artifacts::load(Path::new("/nope/pipeline.json"), Path::new("/nope/model.json"));
        assert!(!artifacts.all_loaded());
        assert!(artifacts.pipeline_status.error.is_some());

        let err = artifacts.transformer.transform(&StudentProfile::MAXIMUM).unwrap_err();
        assert!(matches!(err, InferenceError::Unavailable { .. }));

        let err = artifacts.classifier.predict(&FeatureVector(vec![0.0; 13])).unwrap_err();
        assert!(matches!(err, InferenceError::Unavailable { .. }));
        assert!(!artifacts.classifier.supports_proba());
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let artifacts = Artifacts::load(
            &root.join(crate::config::defaults::DEFAULT_PIPELINE_PATH),
            &root.join(crate::config::defaults::DEFAULT_MODEL_PATH),
        );
        assert!(artifacts.all_loaded(), "{:?} / {:?}", artifacts.pipeline_status, artifacts.model_status);
        assert!(artifacts.classifier.supports_proba());
        assert_eq!(artifacts.classifier.classes().len(), 2);
    }
}
