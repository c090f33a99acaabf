//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - PostgreSQL-backed report sessions
//! - `memory` - In-memory report sessions for tests

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryReportSession, InMemoryReportStore};
pub use postgres::{PostgresDatabase, PostgresReportSession};
