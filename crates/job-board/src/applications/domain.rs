use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::ApplicationId;
use crate::jobs::EmploymentType;
use crate::validation::{any_selected, consent_given, failed, not_blank, ValidationFailure};

/// Candidate-provided fields from the application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    #[validate(custom(function = "any_selected"))]
    pub availability: BTreeSet<EmploymentType>,
    #[serde(default)]
    pub desired_industries: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub work_history: String,
    /// Embedded resume payload, typically a `data:` URL.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub resume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_filename: Option<String>,
    #[serde(default)]
    pub cover_letter: String,
    /// Free-text role the candidate wants; not linked to a job record.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub job_title: String,
    #[serde(default)]
    #[validate(custom(function = "consent_given"))]
    pub data_consent: bool,
}

impl ApplicationSubmission {
    /// Reports the first failing field in form order.
    pub fn check(&self) -> Result<(), ValidationFailure> {
        self.validate().map_err(|errors| {
            if failed(&errors, "full_name") {
                ValidationFailure::MissingField("fullName")
            } else if failed(&errors, "email") {
                ValidationFailure::InvalidEmail(self.email.clone())
            } else if failed(&errors, "job_title") {
                ValidationFailure::MissingField("jobTitle")
            } else if failed(&errors, "resume") {
                ValidationFailure::MissingResume
            } else if failed(&errors, "availability") {
                ValidationFailure::MissingAvailability
            } else if failed(&errors, "data_consent") {
                ValidationFailure::ConsentRequired
            } else {
                errors.into()
            }
        })
    }
}

/// A stored employee application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeApplication {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub details: ApplicationSubmission,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> ApplicationSubmission {
        ApplicationSubmission {
            full_name: "Priya Raman".to_string(),
            email: "priya@example.com".to_string(),
            phone: "416-555-0101".to_string(),
            address: String::new(),
            availability: BTreeSet::from([EmploymentType::FullTime, EmploymentType::Contract]),
            desired_industries: "Technology".to_string(),
            skills: "React, TypeScript".to_string(),
            work_history: String::new(),
            resume: "data:application/pdf;base64,JVBERi0xLjQK".to_string(),
            resume_filename: Some("priya.pdf".to_string()),
            cover_letter: String::new(),
            job_title: "Senior Frontend Developer".to_string(),
            data_consent: true,
        }
    }

    #[test]
    fn complete_submission_passes() {
        assert!(submission().check().is_ok());
    }

    #[test]
    fn each_required_field_is_enforced() {
        let mut missing_name = submission();
        missing_name.full_name = " ".to_string();
        assert_eq!(
            missing_name.check(),
            Err(ValidationFailure::MissingField("fullName"))
        );

        let mut bad_email = submission();
        bad_email.email = "priya-at-example".to_string();
        assert!(matches!(
            bad_email.check(),
            Err(ValidationFailure::InvalidEmail(_))
        ));

        let mut no_title = submission();
        no_title.job_title.clear();
        assert_eq!(
            no_title.check(),
            Err(ValidationFailure::MissingField("jobTitle"))
        );

        let mut no_resume = submission();
        no_resume.resume.clear();
        assert_eq!(no_resume.check(), Err(ValidationFailure::MissingResume));

        let mut no_availability = submission();
        no_availability.availability.clear();
        assert_eq!(
            no_availability.check(),
            Err(ValidationFailure::MissingAvailability)
        );

        let mut no_consent = submission();
        no_consent.data_consent = false;
        assert_eq!(no_consent.check(), Err(ValidationFailure::ConsentRequired));
    }

    #[test]
    fn stored_application_is_flat_camel_case() {
        let stored = EmployeeApplication {
            id: ApplicationId::from("a-1"),
            details: submission(),
            submitted_at: "2024-07-25T09:30:00Z".parse().expect("timestamp"),
        };
        let encoded = serde_json::to_value(&stored).expect("serializes");
        assert_eq!(encoded["id"], json!("a-1"));
        assert_eq!(encoded["fullName"], json!("Priya Raman"));
        assert_eq!(encoded["availability"], json!(["Full-time", "Contract"]));
        assert_eq!(encoded["dataConsent"], json!(true));
        assert_eq!(encoded["submittedAt"], json!("2024-07-25T09:30:00Z"));

        let decoded: EmployeeApplication = serde_json::from_value(encoded).expect("decodes");
        assert_eq!(decoded, stored);
    }
}
