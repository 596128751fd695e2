//! Command-line controls for the `predict` subcommand.

use clap::Args;

use super::ProfileCollector;
use crate::types::{ProfileError, StudentProfile};

/// Thirteen bounded flags, one per profile field. Defaults are the minimums.
#[derive(Args, Debug, Clone, Default)]
pub struct CliControls {
    /// 10th percentage (0-100)
    #[arg(long, default_value_t = 0.0, value_parser = parse_percentage)]
    pub tenth: f64,

    /// 12th percentage (0-100)
    #[arg(long, default_value_t = 0.0, value_parser = parse_percentage)]
    pub twelfth: f64,

    /// CGPA (0-10)
    #[arg(long, default_value_t = 0.0, value_parser = parse_cgpa)]
    pub cgpa: f64,

    /// Internships (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub internships: u8,

    /// Projects (0-20)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=20))]
    pub projects: u8,

    /// Aptitude score (0-100)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub aptitude: u8,

    /// Soft skills (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub soft_skills: u8,

    /// Leadership (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub leadership: u8,

    /// Extracurricular activities (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub extracurricular: u8,

    /// Certifications (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub certifications: u8,

    /// Backlogs (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub backlogs: u8,

    /// DSA knowledge (0-100)
    #[arg(long, default_value_t = 0.0, value_parser = parse_percentage)]
    pub dsa: f64,

    /// Programming languages known (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub languages: u8,
}

fn parse_bounded(s: &str, max: f64) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(format!("{value} is not in 0..={max}"));
    }
    Ok(value)
}

fn parse_percentage(s: &str) -> Result<f64, String> {
    parse_bounded(s, 100.0)
}

fn parse_cgpa(s: &str) -> Result<f64, String> {
    parse_bounded(s, 10.0)
}

impl ProfileCollector for CliControls {
    fn collect(&self) -> Result<StudentProfile, ProfileError> {
        StudentProfile::from_row([
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
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        controls: CliControls,
    }

    #[test]
    fn test_no_flags_collects_zero_profile() {
        let h = Harness::try_parse_from(["predict"]).unwrap();
        assert_eq!(h.controls.collect().unwrap(), StudentProfile::ZERO);
    }

    #[test]
    fn test_scenario_flags() {
        let h = Harness::try_parse_from([
            "predict", "--tenth", "85", "--twelfth", "90", "--cgpa", "8.5", "--internships", "2",
            "--projects", "5", "--aptitude", "75", "--soft-skills", "7", "--leadership", "6",
            "--extracurricular", "4", "--certifications", "3", "--backlogs", "0", "--dsa", "60",
            "--languages", "5",
        ])
        .unwrap();
        let profile = h.controls.collect().unwrap();
        assert_eq!(
            profile.to_row(),
            [85.0, 90.0, 8.5, 2.0, 5.0, 75.0, 7.0, 6.0, 4.0, 3.0, 0.0, 60.0, 5.0]
        );
    }

    #[test]
    fn test_out_of_range_flags_are_refused_by_parser() {
        assert!(Harness::try_parse_from(["predict", "--projects", "21"]).is_err());
        assert!(Harness::try_parse_from(["predict", "--cgpa", "10.1"]).is_err());
        assert!(Harness::try_parse_from(["predict", "--tenth", "-1"]).is_err());
        assert!(Harness::try_parse_from(["predict", "--dsa", "NaN"]).is_err());
    }
}
