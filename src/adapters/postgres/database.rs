//! PostgreSQL connection pool and session factory.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use super::report_session::PostgresReportSession;
use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Owns the connection pool and hands out one session per caller.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Build the pool from configuration, applying migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::database("Failed to create pool", e))?;

        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        let database = Self { pool };
        if config.run_migrations {
            database.migrate().await?;
        }
        Ok(database)
    }

    /// Apply the embedded reports/likes schema migrations.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to run migrations", e))?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Check that the database answers.
    pub async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Database health check failed", e))?;
        Ok(())
    }

    /// Acquire a pooled connection for one caller.
    ///
    /// The connection goes back to the pool on `close` or drop.
    pub async fn open_session(&self) -> Result<PostgresReportSession, DomainError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::database("Failed to acquire connection", e))?;
        debug!("Report session opened");
        Ok(PostgresReportSession::new(conn))
    }
}
