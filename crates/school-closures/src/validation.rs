//! Validation of raw form submissions.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. every required field is non-empty after trimming
//! 2. the year of closure is an integer within [`MIN_YEAR`, `MAX_YEAR`]
//! 3. the student count is a non-negative integer
//! 4. (strict mode only) the district is a known district

use thiserror::Error;

use crate::catalog::{self, MAX_YEAR, MIN_YEAR};
use crate::record::{ClosureForm, FormField, NOT_PROVIDED, ValidatedPayload};

/// Why a form submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<FormField>),

    /// Year of closure is not an integer or is out of range.
    #[error(
        "Invalid year '{0}': year of closure must be between {min} and {max}",
        min = MIN_YEAR,
        max = MAX_YEAR
    )]
    InvalidYear(String),

    /// Student count is not an integer or is negative.
    #[error("Invalid student count '{0}': number of students cannot be negative")]
    InvalidStudentCount(String),

    /// District is not in the known district list (strict mode).
    #[error("Unknown district '{0}'")]
    UnknownDistrict(String),
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Configuration for the validator.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Reject districts that are not in [`catalog::DISTRICTS`].
    pub known_districts_only: bool,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept districts from the known district list.
    pub fn with_known_districts_only(mut self, enabled: bool) -> Self {
        self.known_districts_only = enabled;
        self
    }
}

/// Checks a [`ClosureForm`] and produces a typed payload.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator that only requires districts to be non-empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a form submission.
    pub fn validate(&self, form: &ClosureForm) -> Result<ValidatedPayload, ValidationError> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && form.get(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let year = parse_year(&form.year_of_closure)?;
        let students = parse_student_count(&form.students_before_closure)?;

        let district = form.district.trim();
        if self.config.known_districts_only && !catalog::is_known_district(district) {
            return Err(ValidationError::UnknownDistrict(district.to_string()));
        }

        let opinion = form.community_opinion.trim();

        Ok(ValidatedPayload {
            school_name: form.school_name.trim().to_string(),
            district: district.to_string(),
            village: form.village.trim().to_string(),
            year_of_closure: year,
            reason_for_closure: form.reason_for_closure.trim().to_string(),
            students_before_closure: students,
            where_students_go: form.where_students_go.trim().to_string(),
            community_opinion: if opinion.is_empty() {
                NOT_PROVIDED.to_string()
            } else {
                opinion.to_string()
            },
        })
    }
}

/// Validate a form submission with the default (loose district) rules.
pub fn validate(form: &ClosureForm) -> Result<ValidatedPayload, ValidationError> {
    Validator::new().validate(form)
}

fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .filter(|year| catalog::year_range().contains(year))
        .ok_or_else(|| ValidationError::InvalidYear(trimmed.to_string()))
}

fn parse_student_count(raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidStudentCount(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ClosureForm {
        ClosureForm {
            school_name: "Zilla Parishad School".to_string(),
            district: "Pune".to_string(),
            village: "Shirur".to_string(),
            year_of_closure: "2022".to_string(),
            reason_for_closure: "Low student enrollment".to_string(),
            students_before_closure: "45".to_string(),
            where_students_go: "Government School, Shirur Town".to_string(),
            community_opinion: String::new(),
        }
    }

    #[test]
    fn test_valid_form() {
        let payload = validate(&complete_form()).unwrap();
        assert_eq!(payload.year_of_closure, 2022);
        assert_eq!(payload.students_before_closure, 45);
        assert_eq!(payload.community_opinion, NOT_PROVIDED);
    }

    #[test]
    fn test_trims_text_fields() {
        let form = complete_form()
            .with_field(FormField::SchoolName, "  ZP School  ")
            .with_field(FormField::YearOfClosure, " 2021 ")
            .with_field(FormField::CommunityOpinion, "  Parents unhappy ");
        let payload = validate(&form).unwrap();

        assert_eq!(payload.school_name, "ZP School");
        assert_eq!(payload.year_of_closure, 2021);
        assert_eq!(payload.community_opinion, "Parents unhappy");
    }

    #[test]
    fn test_missing_fields_listed_in_form_order() {
        let form = complete_form()
            .with_field(FormField::WhereStudentsGo, "")
            .with_field(FormField::SchoolName, "   ");

        assert_eq!(
            validate(&form),
            Err(ValidationError::MissingFields(vec![
                FormField::SchoolName,
                FormField::WhereStudentsGo,
            ]))
        );
    }

    #[test]
    fn test_missing_fields_checked_before_year() {
        let form = complete_form()
            .with_field(FormField::Village, "")
            .with_field(FormField::YearOfClosure, "1999");

        assert!(matches!(
            validate(&form),
            Err(ValidationError::MissingFields(_))
        ));
    }

    #[test]
    fn test_year_bounds() {
        for year in 2020..=2025 {
            let form = complete_form().with_field(FormField::YearOfClosure, year.to_string());
            assert!(validate(&form).is_ok(), "year {} should pass", year);
        }
        for year in ["2019", "2026", "twenty", "2022.5"] {
            let form = complete_form().with_field(FormField::YearOfClosure, year);
            assert_eq!(
                validate(&form),
                Err(ValidationError::InvalidYear(year.to_string()))
            );
        }
    }

    #[test]
    fn test_year_checked_before_students() {
        let form = complete_form()
            .with_field(FormField::YearOfClosure, "2030")
            .with_field(FormField::StudentsBeforeClosure, "-1");

        assert!(matches!(validate(&form), Err(ValidationError::InvalidYear(_))));
    }

    #[test]
    fn test_student_count() {
        for ok in ["0", "1", "450"] {
            let form = complete_form().with_field(FormField::StudentsBeforeClosure, ok);
            assert!(validate(&form).is_ok());
        }
        for bad in ["-1", "-450", "many", "4.5"] {
            let form = complete_form().with_field(FormField::StudentsBeforeClosure, bad);
            assert_eq!(
                validate(&form),
                Err(ValidationError::InvalidStudentCount(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_student_count_above_u32_range() {
        let form = complete_form().with_field(FormField::StudentsBeforeClosure, "5000000000");
        assert_eq!(validate(&form).unwrap().students_before_closure, 5_000_000_000);

        let max = u64::MAX.to_string();
        let form = complete_form().with_field(FormField::StudentsBeforeClosure, max.as_str());
        assert_eq!(validate(&form).unwrap().students_before_closure, u64::MAX);

        let form = complete_form()
            .with_field(FormField::StudentsBeforeClosure, "18446744073709551616");
        assert!(matches!(
            validate(&form),
            Err(ValidationError::InvalidStudentCount(_))
        ));
    }

    #[test]
    fn test_unknown_district_allowed_by_default() {
        let form = complete_form().with_field(FormField::District, "Atlantis");
        assert_eq!(validate(&form).unwrap().district, "Atlantis");
    }

    #[test]
    fn test_strict_district() {
        let validator =
            Validator::with_config(ValidationConfig::new().with_known_districts_only(true));

        assert!(validator.validate(&complete_form()).is_ok());

        let form = complete_form().with_field(FormField::District, "Atlantis");
        assert_eq!(
            validator.validate(&form),
            Err(ValidationError::UnknownDistrict("Atlantis".to_string()))
        );
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = ValidationError::MissingFields(vec![FormField::SchoolName, FormField::Village]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: School Name, Village"
        );
        assert!(ValidationError::InvalidYear("2019".into())
            .to_string()
            .contains("between 2020 and 2025"));
    }
}
