//! PostgreSQL adapters - Database implementation of the report session port.
//!
//! - `PostgresDatabase` - Connection pool, migrations, session factory
//! - `PostgresReportSession` - One pooled connection serving one caller

mod database;
mod report_session;

pub use database::PostgresDatabase;
pub use report_session::PostgresReportSession;
