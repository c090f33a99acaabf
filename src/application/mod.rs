//! Application layer - report service, views and validation.
//!
//! This layer turns presentation-side views into store calls made through
//! a `ReportSession` port.

pub mod report_service;
pub mod report_validator;
pub mod views;

pub use report_service::{ReportService, SaveOutcome, DEFAULT_ROWS_PER_PAGE};
pub use views::{EmployeeView, ReportView};
