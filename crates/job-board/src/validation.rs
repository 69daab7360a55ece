use std::collections::BTreeSet;

use validator::{ValidationError, ValidationErrors};

use crate::jobs::EmploymentType;

/// Required-field failures raised before a submission is persisted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address '{0}' is invalid")]
    InvalidEmail(String),
    #[error("at least one availability option must be selected")]
    MissingAvailability,
    #[error("a resume file is required")]
    MissingResume,
    #[error("consent to data processing is required to apply")]
    ConsentRequired,
    #[error("salary range is inverted (min {min} > max {max})")]
    InvertedSalaryRange { min: f64, max: f64 },
    #[error("submission rejected: {0}")]
    Rejected(String),
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        Self::Rejected(errors.to_string())
    }
}

/// True when `field` (the Rust field name) has at least one error, nested
/// struct errors included.
pub(crate) fn failed(errors: &ValidationErrors, field: &str) -> bool {
    errors.errors().contains_key(field)
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn consent_given(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("consent_required"))
    }
}

pub(crate) fn any_selected(value: &BTreeSet<EmploymentType>) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("empty_selection"));
    }
    Ok(())
}
