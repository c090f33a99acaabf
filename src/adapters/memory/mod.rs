//! In-memory adapters for tests and local development.

mod report_session;

pub use report_session::{InMemoryReportSession, InMemoryReportStore};
