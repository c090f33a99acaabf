//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `max_connections`.
const MAX_POOL_SIZE: u32 = 100;

const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection and pool settings.
///
/// Every open report session holds one pooled connection, so
/// `max_connections` caps the number of concurrent sessions. Only `url` has
/// no usable default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply the reports/likes schema migrations on connect
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Connection URL with the password replaced, safe to log.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn only_url_is_needed_to_deserialize() {
        let config: DatabaseConfig = config::Config::builder()
            .set_override("url", "postgres://localhost/daily")
            .unwrap()
            .set_override("run_migrations", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
        assert!(config.run_migrations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_each_bad_setting() {
        let cases = [
            (with_url(""), "missing"),
            (with_url("mysql://localhost/daily"), "scheme"),
            (
                DatabaseConfig {
                    max_connections: MAX_POOL_SIZE + 1,
                    ..with_url("postgres://localhost/daily")
                },
                "too large",
            ),
            (
                DatabaseConfig {
                    min_connections: 4,
                    max_connections: 2,
                    ..with_url("postgres://localhost/daily")
                },
                "min over max",
            ),
            (
                DatabaseConfig {
                    min_connections: 0,
                    max_connections: 0,
                    ..with_url("postgres://localhost/daily")
                },
                "empty pool",
            ),
        ];

        for (config, case) in cases {
            let err = config.validate().unwrap_err();
            let expected = match case {
                "missing" => matches!(err, ValidationError::MissingRequired(_)),
                "scheme" => matches!(err, ValidationError::InvalidDatabaseUrl),
                "too large" => matches!(err, ValidationError::PoolSizeTooLarge),
                _ => matches!(err, ValidationError::InvalidPoolSize),
            };
            assert!(expected, "{}: unexpected {:?}", case, err);
        }
    }

    #[test]
    fn redacted_url_hides_only_the_password() {
        assert_eq!(
            with_url("postgresql://report:s3cret@db:5432/daily").redacted_url(),
            "postgresql://report:***@db:5432/daily"
        );
        assert_eq!(
            with_url("postgresql://localhost/daily").redacted_url(),
            "postgresql://localhost/daily"
        );
    }
}
