//! Employer staffing inquiries.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{EmployerInquiry, InquirySubmission};
pub use router::inquiry_router;
pub use service::{InquiryService, InquiryServiceError};
