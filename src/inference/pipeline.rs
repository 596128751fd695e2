//! Preprocessing pipeline artifact.
//!
//! A fitted chain of per-column scalers exported as JSON:
//!
//! ```json
//! {
//!   "columns": ["Tenth", "Twelfth", ..., "Lang"],
//!   "steps": [
//!     { "type": "standard_scaler", "mean": [...], "scale": [...] }
//!   ]
//! }
//! ```
//!
//! The column list must match the profile's pipeline column order exactly;
//! it is checked once at load time so a mismatched artifact never silently
//! scores permuted inputs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{FeatureVector, InferenceError, Transformer};
use crate::types::{pipeline_columns, StudentProfile, NUM_FIELDS};

/// One fitted preprocessing step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineStep {
    /// `(x - mean) / scale`, with a zero scale treated as 1.
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// `(x - min) / (max - min)`, with a zero span treated as 1.
    MinMaxScaler { min: Vec<f64>, max: Vec<f64> },
    Passthrough,
}

impl PipelineStep {
    fn width(&self) -> Option<(usize, usize)> {
        match self {
            Self::StandardScaler { mean, scale } => Some((mean.len(), scale.len())),
            Self::MinMaxScaler { min, max } => Some((min.len(), max.len())),
            Self::Passthrough => None,
        }
    }

    fn apply(&self, values: &mut [f64]) {
        match self {
            Self::StandardScaler { mean, scale } => {
                for (i, x) in values.iter_mut().enumerate() {
                    let s = if scale[i] == 0.0 { 1.0 } else { scale[i] };
                    *x = (*x - mean[i]) / s;
                }
            }
            Self::MinMaxScaler { min, max } => {
                for (i, x) in values.iter_mut().enumerate() {
                    let span = max[i] - min[i];
                    let span = if span == 0.0 { 1.0 } else { span };
                    *x = (*x - min[i]) / span;
                }
            }
            Self::Passthrough => {}
        }
    }
}

/// Fitted preprocessing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerPipeline {
    pub columns: Vec<String>,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

impl ScalerPipeline {
    /// Load and validate a pipeline artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let bytes = std::fs::read(path).map_err(|source| InferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pipeline: Self = serde_json::from_slice(&bytes).map_err(|source| InferenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Check column names/order and that every step spans all columns.
    pub fn validate(&self) -> Result<(), InferenceError> {
        let expected = pipeline_columns();
        if self.columns.len() != NUM_FIELDS {
            return Err(InferenceError::ShapeMismatch {
                stage: "pipeline columns",
                expected: NUM_FIELDS,
                got: self.columns.len(),
            });
        }
        for (index, (found, expected)) in self.columns.iter().zip(expected.iter()).enumerate() {
            if found != expected {
                return Err(InferenceError::ColumnMismatch {
                    index,
                    expected: (*expected).to_string(),
                    found: found.clone(),
                });
            }
        }
        for step in &self.steps {
            if let Some((a, b)) = step.width() {
                for got in [a, b] {
                    if got != NUM_FIELDS {
                        return Err(InferenceError::ShapeMismatch {
                            stage: "pipeline step",
                            expected: NUM_FIELDS,
                            got,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Transformer for ScalerPipeline {
    fn transform(&self, profile: &StudentProfile) -> Result<FeatureVector, InferenceError> {
        let mut values = profile.to_row().to_vec();
        for step in &self.steps {
            if let Some((a, b)) = step.width() {
                if a != values.len() || b != values.len() {
                    return Err(InferenceError::ShapeMismatch {
                        stage: "pipeline step",
                        expected: values.len(),
                        got: a.min(b),
                    });
                }
            }
            step.apply(&mut values);
        }
        Ok(FeatureVector(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn columns() -> Vec<String> {
        pipeline_columns().iter().map(|c| (*c).to_string()).collect()
    }

    fn scenario_profile() -> StudentProfile {
        StudentProfile::from_row([85.0, 90.0, 8.5, 2.0, 5.0, 75.0, 7.0, 6.0, 4.0, 3.0, 0.0, 60.0, 5.0])
            .unwrap()
    }

    #[test]
    fn test_passthrough_keeps_row() {
        let pipeline = ScalerPipeline { columns: columns(), steps: vec![PipelineStep::Passthrough] };
        let features = pipeline.transform(&scenario_profile()).unwrap();
        assert_eq!(features.as_slice(), &scenario_profile().to_row());
    }

    #[test]
    fn test_standard_scaler() {
        let pipeline = ScalerPipeline {
            columns: columns(),
            steps: vec![PipelineStep::StandardScaler {
                mean: vec![80.0; NUM_FIELDS],
                scale: {
                    let mut s = vec![5.0; NUM_FIELDS];
                    s[1] = 0.0;
                    s
                },
            }],
        };
        let features = pipeline.transform(&scenario_profile()).unwrap();
        assert!((features.as_slice()[0] - 1.0).abs() < 1e-12);
        // Zero scale behaves like unit scale
        assert!((features.as_slice()[1] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_scaler_chain() {
        let pipeline = ScalerPipeline {
            columns: columns(),
            steps: vec![
                PipelineStep::MinMaxScaler { min: vec![0.0; NUM_FIELDS], max: vec![100.0; NUM_FIELDS] },
                PipelineStep::Passthrough,
            ],
        };
        let features = pipeline.transform(&scenario_profile()).unwrap();
        assert!((features.as_slice()[0] - 0.85).abs() < 1e-12);
        assert_eq!(features.len(), NUM_FIELDS);
    }

    #[test]
    fn test_validate_rejects_permuted_columns() {
        let mut cols = columns();
        cols.swap(0, 1);
        let pipeline = ScalerPipeline { columns: cols, steps: vec![] };
        assert!(matches!(
            pipeline.validate(),
            Err(InferenceError::ColumnMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_short_step() {
        let pipeline = ScalerPipeline {
            columns: columns(),
            steps: vec![PipelineStep::StandardScaler { mean: vec![0.0; 12], scale: vec![1.0; 13] }],
        };
        assert!(matches!(
            pipeline.validate(),
            Err(InferenceError::ShapeMismatch { expected: 13, got: 12, .. })
        ));
        // Unvalidated artifacts fail at transform time instead
        assert!(pipeline.transform(&scenario_profile()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "columns": columns(),
            "steps": [{ "type": "passthrough" }]
        });
        write!(file, "{json}").unwrap();
        let pipeline = ScalerPipeline::load(file.path()).unwrap();
        assert_eq!(pipeline.steps.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScalerPipeline::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InferenceError::Io { .. }));
    }

    #[test]
    fn test_load_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ScalerPipeline::load(file.path()),
            Err(InferenceError::Parse { .. })
        ));
    }
}
