//! Job postings: domain types, the listing query engine, the service facade
//! and its HTTP routes.

pub mod domain;
pub mod query;
pub mod router;
pub mod service;

pub use domain::{EmploymentType, Job, JobCategory, NewJob, SalaryRange};
pub use query::{
    run_query, unique_values, JobField, JobFilter, JobPage, LocationFilter, PageRequest,
    QueryError, DEFAULT_PAGE_SIZE,
};
pub use router::{job_router, JobListParams};
pub use service::{JobService, JobServiceError};
