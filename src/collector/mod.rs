//! Input collector
//!
//! Turns the thirteen labeled controls of a surface into one
//! [`StudentProfile`]. Each surface bounds its own controls:
//!
//! - [`FormSubmission`]: the HTTP form body. Absent fields take their
//!   default; out-of-range values are refused with the offending field named.
//! - [`CliControls`]: `predict` subcommand flags, each parsed by a bounded
//!   value parser so an out-of-range value never gets past clap.

mod cli;

pub use cli::*;

use serde::Deserialize;

use crate::types::{ProfileError, StudentProfile, FIELD_SPECS, NUM_FIELDS};

/// A source of student profiles.
pub trait ProfileCollector {
    /// Gather current control values into a fully populated profile.
    fn collect(&self) -> Result<StudentProfile, ProfileError>;
}

/// Body of a form submission, keyed by field name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSubmission {
    pub tenth: Option<f64>,
    pub twelfth: Option<f64>,
    pub cgpa: Option<f64>,
    pub internships: Option<f64>,
    pub projects: Option<f64>,
    pub aptitude: Option<f64>,
    pub soft_skills: Option<f64>,
    pub leadership: Option<f64>,
    pub extracurricular: Option<f64>,
    pub certifications: Option<f64>,
    pub backlogs: Option<f64>,
    pub dsa: Option<f64>,
    pub languages: Option<f64>,
}

impl FormSubmission {
    fn values(&self) -> [Option<f64>; NUM_FIELDS] {
        [
            self.tenth,
            self.twelfth,
            self.cgpa,
            self.internships,
            self.projects,
            self.aptitude,
            self.soft_skills,
            self.leadership,
            self.extracurricular,
            self.certifications,
            self.backlogs,
            self.dsa,
            self.languages,
        ]
    }
}

impl ProfileCollector for FormSubmission {
    fn collect(&self) -> Result<StudentProfile, ProfileError> {
        let mut row = [0.0; NUM_FIELDS];
        for ((slot, value), spec) in row.iter_mut().zip(self.values()).zip(FIELD_SPECS.iter()) {
            *slot = value.unwrap_or(spec.default);
        }
        StudentProfile::from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_collects_defaults() {
        let profile = FormSubmission::default().collect().unwrap();
        assert_eq!(profile, StudentProfile::ZERO);
    }

    #[test]
    fn test_partial_form() {
        let form: FormSubmission = serde_json::from_value(serde_json::json!({
            "cgpa": 8.5,
            "projects": 5
        }))
        .unwrap();
        let profile = form.collect().unwrap();
        assert_eq!(profile.value("cgpa"), Some(8.5));
        assert_eq!(profile.value("projects"), Some(5.0));
        assert_eq!(profile.value("tenth"), Some(0.0));
    }

    #[test]
    fn test_out_of_range_names_field() {
        let form = FormSubmission { aptitude: Some(101.0), ..Default::default() };
        let err = form.collect().unwrap_err();
        assert!(err.to_string().contains("aptitude"));
    }

    #[test]
    fn test_unknown_field_is_refused() {
        let result: Result<FormSubmission, _> =
            serde_json::from_value(serde_json::json!({ "gpa": 9.0 }));
        assert!(result.is_err());
    }
}
