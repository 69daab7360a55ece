//! Employee applications submitted through the public intake form.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{ApplicationSubmission, EmployeeApplication};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
