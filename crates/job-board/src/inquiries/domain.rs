use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::InquiryId;
use crate::validation::{failed, not_blank, ValidationFailure};

/// Staffing request sent by a prospective employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    #[validate(custom(function = "not_blank"))]
    pub company_name: String,
    #[validate(custom(function = "not_blank"))]
    pub contact_person: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub staffing_need: String,
}

impl InquirySubmission {
    pub fn check(&self) -> Result<(), ValidationFailure> {
        self.validate().map_err(|errors| {
            if failed(&errors, "company_name") {
                ValidationFailure::MissingField("companyName")
            } else if failed(&errors, "contact_person") {
                ValidationFailure::MissingField("contactPerson")
            } else if failed(&errors, "email") {
                ValidationFailure::InvalidEmail(self.email.clone())
            } else if failed(&errors, "staffing_need") {
                ValidationFailure::MissingField("staffingNeed")
            } else {
                errors.into()
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerInquiry {
    pub id: InquiryId,
    #[serde(flatten)]
    pub details: InquirySubmission,
    pub submitted_at: DateTime<Utc>,
}
