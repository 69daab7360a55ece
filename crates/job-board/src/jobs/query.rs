//! Filtering, ordering and pagination over the job collection.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{EmploymentType, Job};

pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Location criterion. Exact matching and the remote-only shortcut are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFilter {
    Exact(String),
    RemoteOnly,
}

impl LocationFilter {
    fn matches(&self, location: &str) -> bool {
        match self {
            LocationFilter::Exact(expected) => location == expected,
            LocationFilter::RemoteOnly => location.to_lowercase().contains("remote"),
        }
    }
}

/// Criteria applied as independent AND predicates. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search_term: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub location: Option<LocationFilter>,
}

impl JobFilter {
    /// Builds a filter from loose inputs, rejecting a location together with
    /// the remote-only flag.
    pub fn from_parts(
        search_term: Option<String>,
        employment_type: Option<EmploymentType>,
        location: Option<String>,
        remote_only: bool,
    ) -> Result<Self, QueryError> {
        let location = location.filter(|value| !value.is_empty());
        let location = match (location, remote_only) {
            (Some(_), true) => return Err(QueryError::ConflictingLocationFilters),
            (Some(value), false) => Some(LocationFilter::Exact(value)),
            (None, true) => Some(LocationFilter::RemoteOnly),
            (None, false) => None,
        };

        Ok(Self {
            search_term: search_term.filter(|term| !term.is_empty()),
            employment_type,
            location,
        })
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(term) = self.search_term.as_deref().filter(|term| !term.is_empty()) {
            let term = term.to_lowercase();
            if !job.title.to_lowercase().contains(&term)
                && !job.company.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(kind) = self.employment_type {
            if job.employment_type != kind {
                return false;
            }
        }

        match &self.location {
            Some(location) => location.matches(&job.location),
            None => true,
        }
    }
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage);
        }
        if limit == 0 {
            return Err(QueryError::InvalidLimit);
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub items: Vec<Job>,
    pub total_count: usize,
    pub page: u32,
    pub limit: u32,
}

/// Filter, order newest-first by posted date, then slice out one page.
pub fn run_query(jobs: Vec<Job>, filter: &JobFilter, window: PageRequest) -> JobPage {
    let mut matching: Vec<Job> = jobs.into_iter().filter(|job| filter.matches(job)).collect();
    matching.sort_by_key(|job| Reverse(job.posted_date));

    let total_count = matching.len();
    let items = matching
        .into_iter()
        .skip(window.offset())
        .take(window.limit as usize)
        .collect();

    JobPage {
        items,
        total_count,
        page: window.page,
        limit: window.limit,
    }
}

/// Job attributes that feed the listing dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobField {
    EmploymentType,
    Location,
}

impl JobField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "employmentType" | "employment_type" => Some(Self::EmploymentType),
            "location" => Some(Self::Location),
            _ => None,
        }
    }
}

/// Sorted, deduplicated, non-empty values of `field` across `jobs`.
pub fn unique_values(jobs: &[Job], field: JobField) -> Vec<String> {
    let values: BTreeSet<&str> = jobs
        .iter()
        .map(|job| match field {
            JobField::EmploymentType => job.employment_type.label(),
            JobField::Location => job.location.as_str(),
        })
        .filter(|value| !value.is_empty())
        .collect();
    values.into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("page numbers start at 1")]
    InvalidPage,
    #[error("page size must be at least 1")]
    InvalidLimit,
    #[error("location and remote-only filters cannot be combined")]
    ConflictingLocationFilters,
    #[error("unknown job field '{0}' (expected employmentType or location)")]
    UnknownField(String),
}
