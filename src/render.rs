//! User-facing rendering of gate outcomes.

use serde::Serialize;

use crate::types::{Outcome, RejectReason};

/// Notice shown when the pipeline or model fails. Details stay in the logs.
pub const FAILURE_NOTICE: &str = "Prediction failed. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub fn render(outcome: &Outcome) -> Rendered {
    match outcome {
        Outcome::Rejected { reason: RejectReason::AllZero } => Rendered {
            severity: Severity::Error,
            message: "❌ Prediction not possible when all inputs are zero.".to_string(),
        },
        Outcome::Rejected { reason: RejectReason::AllMaximum } => Rendered {
            severity: Severity::Warning,
            message: "🤖 You cannot be that perfect! Please enter realistic values.".to_string(),
        },
        Outcome::Predicted { label, probability: Some(p) } => Rendered {
            severity: Severity::Success,
            message: format!("Prediction: {label} (Probability: {p:.2}%)"),
        },
        Outcome::Predicted { label, probability: None } => Rendered {
            severity: Severity::Success,
            message: format!("Prediction: {label}"),
        },
    }
}

pub fn render_failure() -> Rendered {
    Rendered {
        severity: Severity::Error,
        message: FAILURE_NOTICE.to_string(),
    }
}
