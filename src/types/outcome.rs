//! Prediction gate outcomes.

use serde::Serialize;

/// Why a submission never reached the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Every field equals zero.
    AllZero,
    /// Every field equals its declared maximum.
    AllMaximum,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllZero => "all_zero",
            Self::AllMaximum => "all_maximum",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Degenerate input, rejected before the pipeline.
    Rejected { reason: RejectReason },
    /// Model output. `probability` is the positive-class probability as a
    /// percentage rounded to two decimals, present only when the model
    /// exposes class probabilities.
    Predicted {
        label: String,
        probability: Option<f64>,
    },
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Convert a `[0, 1]` probability into a percentage with two-decimal precision.
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert!((to_percentage(0.82) - 82.0).abs() < 1e-9);
        assert!((to_percentage(0.123_456) - 12.35).abs() < 1e-9);
        assert!((to_percentage(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((to_percentage(1.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let rejected = serde_json::to_value(Outcome::Rejected { reason: RejectReason::AllZero }).unwrap();
        assert_eq!(rejected["status"], "rejected");
        assert_eq!(rejected["reason"], "all_zero");

        let predicted = serde_json::to_value(Outcome::Predicted {
            label: "Placed".to_string(),
            probability: None,
        })
        .unwrap();
        assert_eq!(predicted["status"], "predicted");
        assert_eq!(predicted["label"], "Placed");
        assert!(predicted["probability"].is_null());
    }
}
