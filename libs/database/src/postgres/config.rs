use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

/// PostgreSQL connection pool configuration.
///
/// The pool is deliberately small: the service is a thin CRUD layer and a
/// handful of connections is enough. Connections are recycled periodically
/// and validated before checkout so a dropped server connection never
/// reaches a request handler. Requests beyond pool capacity wait up to the
/// acquire timeout, then fail.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections kept open
    pub min_connections: u32,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Checkout-from-pool timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection reap timeout in seconds
    pub idle_timeout_secs: u64,

    /// Connection recycle age in seconds
    pub max_lifetime_secs: u64,

    /// Validate connections before checkout (pre-ping)
    pub test_before_acquire: bool,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    /// Create a config with the default pool settings for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Convert into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .test_before_acquire(self.test_before_acquire)
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
            sqlx_logging: true,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })
}

/// Load [`PostgresConfig`] from environment variables.
///
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default 5)
/// - `DB_MIN_CONNECTIONS` (default 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (default 10)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default 30)
/// - `DB_IDLE_TIMEOUT_SECS` (default 300)
/// - `DB_MAX_LIFETIME_SECS` (default 1800)
/// - `DB_TEST_BEFORE_ACQUIRE` (default true)
/// - `DB_SQLX_LOGGING` (default true)
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: parse_env("DB_MAX_CONNECTIONS", "5")?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", "1")?,
            connect_timeout_secs: parse_env("DB_CONNECT_TIMEOUT_SECS", "10")?,
            acquire_timeout_secs: parse_env("DB_ACQUIRE_TIMEOUT_SECS", "30")?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", "300")?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", "1800")?,
            test_before_acquire: parse_env("DB_TEST_BEFORE_ACQUIRE", "true")?,
            sqlx_logging: parse_env("DB_SQLX_LOGGING", "true")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_new() {
        let config = PostgresConfig::new("postgresql://localhost/test");
        assert_eq!(config.url, "postgresql://localhost/test");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert!(config.test_before_acquire);
    }

    #[test]
    fn test_postgres_config_into_connect_options() {
        let config = PostgresConfig::new("postgresql://localhost/test");
        let _options = config.into_connect_options();
    }

    #[test]
    fn test_postgres_config_from_env_minimal() {
        temp_env::with_var("DATABASE_URL", Some("postgresql://localhost/testdb"), || {
            let config = PostgresConfig::from_env().unwrap();
            assert_eq!(config.url, "postgresql://localhost/testdb");
            assert_eq!(config.max_connections, 5);
            assert_eq!(config.acquire_timeout_secs, 30);
        });
    }

    #[test]
    fn test_postgres_config_from_env_custom_pool() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/testdb")),
                ("DB_MAX_CONNECTIONS", Some("12")),
                ("DB_MIN_CONNECTIONS", Some("3")),
                ("DB_MAX_LIFETIME_SECS", Some("3600")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.max_connections, 12);
                assert_eq!(config.min_connections, 3);
                assert_eq!(config.max_lifetime_secs, 3600);
            },
        );
    }

    #[test]
    fn test_postgres_config_from_env_missing_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = PostgresConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_postgres_config_from_env_invalid_number() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/testdb")),
                ("DB_MAX_CONNECTIONS", Some("invalid")),
            ],
            || {
                let err = PostgresConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
            },
        );
    }
}
