//! Job board data service: public listings and search, employee applications,
//! employer inquiries, and the admin operations over all three.

pub mod applications;
pub mod board;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ids;
pub mod inquiries;
pub mod jobs;
pub mod latency;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use board::JobBoard;
