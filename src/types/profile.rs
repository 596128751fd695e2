//! Student profile: the 13-field record fed to the placement pipeline.
//!
//! Field order is fixed and matches the column order the preprocessing
//! pipeline was fitted on. Every value is bounded by its control's declared
//! range; the only way to build a profile is [`StudentProfile::from_row`],
//! which refuses anything outside those ranges.

use serde::Serialize;
use thiserror::Error;

/// Number of fields in a student profile.
pub const NUM_FIELDS: usize = 13;

// ============================================================================
// Control Table
// ============================================================================

/// How a field is entered and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Free numeric entry (percentages, CGPA, DSA score).
    Float,
    /// Whole-number counts and 0-10 ratings.
    Integer,
}

/// Declared shape of one input control.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Field name used by the form body and CLI flags.
    pub name: &'static str,
    /// Column name the preprocessing pipeline expects.
    pub column: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    /// Default value (always the minimum).
    pub default: f64,
    pub step: f64,
    pub kind: ControlKind,
}

const fn float_field(
    name: &'static str,
    column: &'static str,
    label: &'static str,
    max: f64,
    step: f64,
) -> FieldSpec {
    FieldSpec { name, column, label, min: 0.0, max, default: 0.0, step, kind: ControlKind::Float }
}

const fn int_field(name: &'static str, column: &'static str, label: &'static str, max: f64) -> FieldSpec {
    FieldSpec { name, column, label, min: 0.0, max, default: 0.0, step: 1.0, kind: ControlKind::Integer }
}

/// The thirteen controls, in pipeline column order.
pub const FIELD_SPECS: [FieldSpec; NUM_FIELDS] = [
    float_field("tenth", "Tenth", "10th Percentage", 100.0, 1.0),
    float_field("twelfth", "Twelfth", "12th Percentage", 100.0, 1.0),
    float_field("cgpa", "CGPA", "CGPA", 10.0, 0.1),
    int_field("internships", "Internships", "Internships", 10.0),
    int_field("projects", "Projects", "Projects", 20.0),
    int_field("aptitude", "Aptitude", "Aptitude Score", 100.0),
    int_field("soft_skills", "Soft skills", "Soft Skills (0-10)", 10.0),
    int_field("leadership", "Leadership", "Leadership", 10.0),
    int_field("extracurricular", "Extracurricular", "Extracurricular Activities", 10.0),
    int_field("certifications", "Certifications", "Certifications (0-10)", 10.0),
    int_field("backlogs", "Backlogs", "Backlogs (0-10)", 10.0),
    float_field("dsa", "DSA", "DSA Knowledge (0.0 - 100.0)", 100.0, 10.0),
    int_field("languages", "Lang", "Programming Languages Known (0-10)", 10.0),
];

/// Pipeline column names in order.
pub fn pipeline_columns() -> [&'static str; NUM_FIELDS] {
    FIELD_SPECS.map(|spec| spec.column)
}

/// Look up a control by field name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|spec| spec.name == name)
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} = {value} is outside its range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be a whole number (got {value})")]
    NotWhole { field: &'static str, value: f64 },
}

// ============================================================================
// Profile
// ============================================================================

/// One student's academic and skill metrics.
///
/// Fields are private: a profile is either one of the named constants or
/// the product of a range-checked constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudentProfile {
    tenth: f64,
    twelfth: f64,
    cgpa: f64,
    internships: u8,
    projects: u8,
    aptitude: u8,
    soft_skills: u8,
    leadership: u8,
    extracurricular: u8,
    certifications: u8,
    backlogs: u8,
    dsa: f64,
    languages: u8,
}

impl StudentProfile {
    /// Every field at zero: a submission with no information content.
    pub const ZERO: Self = Self {
        tenth: 0.0,
        twelfth: 0.0,
        cgpa: 0.0,
        internships: 0,
        projects: 0,
        aptitude: 0,
        soft_skills: 0,
        leadership: 0,
        extracurricular: 0,
        certifications: 0,
        backlogs: 0,
        dsa: 0.0,
        languages: 0,
    };

    /// Every field at its declared maximum.
    pub const MAXIMUM: Self = Self {
        tenth: 100.0,
        twelfth: 100.0,
        cgpa: 10.0,
        internships: 10,
        projects: 20,
        aptitude: 100,
        soft_skills: 10,
        leadership: 10,
        extracurricular: 10,
        certifications: 10,
        backlogs: 10,
        dsa: 100.0,
        languages: 10,
    };

    /// Build a profile from values in pipeline column order.
    ///
    /// Integer controls must hold whole numbers; every value must lie in
    /// its control's `[min, max]`.
    pub fn from_row(row: [f64; NUM_FIELDS]) -> Result<Self, ProfileError> {
        for (spec, &value) in FIELD_SPECS.iter().zip(row.iter()) {
            check_value(spec, value)?;
        }

        // Range checks above guarantee every integer field fits in a u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let int = |v: f64| v as u8;

        Ok(Self {
            tenth: row[0],
            twelfth: row[1],
            cgpa: row[2],
            internships: int(row[3]),
            projects: int(row[4]),
            aptitude: int(row[5]),
            soft_skills: int(row[6]),
            leadership: int(row[7]),
            extracurricular: int(row[8]),
            certifications: int(row[9]),
            backlogs: int(row[10]),
            dsa: row[11],
            languages: int(row[12]),
        })
    }

    /// Values in pipeline column order.
    pub fn to_row(&self) -> [f64; NUM_FIELDS] {
        [
            self.tenth,
            self.twelfth,
            self.cgpa,
            f64::from(self.internships),
            f64::from(self.projects),
            f64::from(self.aptitude),
            f64::from(self.soft_skills),
            f64::from(self.leadership),
            f64::from(self.extracurricular),
            f64::from(self.certifications),
            f64::from(self.backlogs),
            self.dsa,
            f64::from(self.languages),
        ]
    }

    /// Value of a field by name.
    pub fn value(&self, name: &str) -> Option<f64> {
        FIELD_SPECS
            .iter()
            .position(|spec| spec.name == name)
            .map(|i| self.to_row()[i])
    }
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self::ZERO
    }
}

fn check_value(spec: &FieldSpec, value: f64) -> Result<(), ProfileError> {
    if !value.is_finite() {
        return Err(ProfileError::NotFinite { field: spec.name, value });
    }
    if value < spec.min || value > spec.max {
        return Err(ProfileError::OutOfRange {
            field: spec.name,
            value,
            min: spec.min,
            max: spec.max,
        });
    }
    if spec.kind == ControlKind::Integer && value.fract() != 0.0 {
        return Err(ProfileError::NotWhole { field: spec.name, value });
    }
    Ok(())
}
