use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use validator::{Validate, ValidationError};

use crate::ids::JobId;
use crate::validation::{failed, not_blank, ValidationFailure};

/// Contract shape of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Temporary,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Temporary,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Temporary => "Temporary",
        }
    }

    /// Exact, case-sensitive match against the wire label.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    Technology,
    Design,
    Administrative,
    Management,
    Marketing,
    Finance,
    Healthcare,
}

/// Advertised pay band, annual or hourly depending on `currency`
/// (`CAD`, `CAD/hr`). `visible = false` keeps it off public listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "ordered_range"))]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
    pub visible: bool,
}

fn ordered_range(range: &SalaryRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        return Err(ValidationError::new("inverted_range"));
    }
    Ok(())
}

/// A persisted job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub category: JobCategory,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub featured: bool,
    pub posted_date: DateTime<Utc>,
    pub application_deadline: DateTime<Utc>,
}

/// Everything about a posting the caller controls; id and posted date are
/// assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub company: String,
    #[validate(custom(function = "not_blank"))]
    pub location: String,
    pub employment_type: EmploymentType,
    pub category: JobCategory,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub featured: bool,
    pub application_deadline: DateTime<Utc>,
}

impl NewJob {
    pub fn check(&self) -> Result<(), ValidationFailure> {
        self.validate().map_err(|errors| {
            for (field, label) in [
                ("title", "title"),
                ("company", "company"),
                ("location", "location"),
            ] {
                if failed(&errors, field) {
                    return ValidationFailure::MissingField(label);
                }
            }
            match &self.salary {
                Some(salary) if failed(&errors, "salary") => {
                    ValidationFailure::InvertedSalaryRange {
                        min: salary.min,
                        max: salary.max,
                    }
                }
                _ => errors.into(),
            }
        })
    }

    pub fn into_job(self, id: JobId, posted_date: DateTime<Utc>) -> Job {
        Job {
            id,
            title: self.title,
            company: self.company,
            location: self.location,
            employment_type: self.employment_type,
            category: self.category,
            description: self.description,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
            salary: self.salary,
            featured: self.featured,
            posted_date,
            application_deadline: self.application_deadline,
        }
    }
}

impl From<Job> for NewJob {
    fn from(job: Job) -> Self {
        Self {
            title: job.title,
            company: job.company,
            location: job.location,
            employment_type: job.employment_type,
            category: job.category,
            description: job.description,
            responsibilities: job.responsibilities,
            requirements: job.requirements,
            salary: job.salary,
            featured: job.featured,
            application_deadline: job.application_deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn employment_type_uses_hyphenated_labels() {
        let encoded = serde_json::to_value(EmploymentType::FullTime).expect("serializes");
        assert_eq!(encoded, json!("Full-time"));
        assert_eq!(
            EmploymentType::from_label("Part-time"),
            Some(EmploymentType::PartTime)
        );
        assert_eq!(EmploymentType::from_label("part-time"), None);
    }

    #[test]
    fn job_decodes_stored_camel_case_record() {
        let job: Job = serde_json::from_value(json!({
            "id": "5",
            "title": "Graphic Designer",
            "company": "MarketBoost",
            "location": "Markham, ON",
            "employmentType": "Part-time",
            "category": "Marketing",
            "description": "Create visually stunning graphics.",
            "responsibilities": ["Study design briefs"],
            "requirements": ["Branding"],
            "featured": false,
            "postedDate": "2024-07-10T12:00:00.000Z",
            "applicationDeadline": "2024-08-09T12:00:00.000Z"
        }))
        .expect("decodes");

        assert_eq!(job.id, JobId::from("5"));
        assert_eq!(job.employment_type, EmploymentType::PartTime);
        assert!(job.salary.is_none());
        assert_eq!(job.posted_date.to_rfc3339(), "2024-07-10T12:00:00+00:00");
    }

    #[test]
    fn hourly_rates_keep_their_fraction() {
        let salary: SalaryRange = serde_json::from_value(json!({
            "min": 22.5,
            "max": 27.75,
            "currency": "CAD/hr",
            "visible": true
        }))
        .expect("decodes");
        assert_eq!(salary.min, 22.5);
        assert_eq!(serde_json::to_value(&salary).expect("encodes")["max"], json!(27.75));
        assert!(salary.validate().is_ok());
    }

    #[test]
    fn check_flags_blank_fields_and_inverted_salary() {
        let job: Job = serde_json::from_value(json!({
            "id": "x",
            "title": "Analyst",
            "company": "Acme",
            "location": "Remote",
            "employmentType": "Contract",
            "category": "Finance",
            "description": "",
            "salary": { "min": 90, "max": 60, "currency": "CAD/hr", "visible": true },
            "postedDate": "2024-07-10T12:00:00Z",
            "applicationDeadline": "2024-08-09T12:00:00Z"
        }))
        .expect("decodes");
        let mut draft = NewJob::from(job);

        assert_eq!(
            draft.check(),
            Err(ValidationFailure::InvertedSalaryRange {
                min: 90.0,
                max: 60.0
            })
        );

        draft.salary = None;
        assert!(draft.check().is_ok());

        draft.company = "  ".to_string();
        assert_eq!(
            draft.check(),
            Err(ValidationFailure::MissingField("company"))
        );
    }
}
