//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReportSession` - Per-caller connection to the report and like store

mod report_session;

pub use report_session::{PageRequest, ReportQuery, ReportSession};
