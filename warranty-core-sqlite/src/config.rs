use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Connection settings for the warranty store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Seconds SQLite waits on a locked database before failing
    pub busy_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://warranty.db".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
            busy_timeout_secs: 5,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_ACQUIRE_TIMEOUT_SECS` and `DATABASE_BUSY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.url = url;
        }
        if let Some(value) = parse_env("DATABASE_MAX_CONNECTIONS")? {
            config.max_connections = value;
        }
        if let Some(value) = parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS")? {
            config.acquire_timeout_secs = value;
        }
        if let Some(value) = parse_env("DATABASE_BUSY_TIMEOUT_SECS")? {
            config.busy_timeout_secs = value;
        }
        Ok(config)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

fn parse_env<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}

/// Opens a pool with foreign keys enforced, creating the database file if needed.
pub async fn connect(config: &StoreConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;
    info!(max_connections = config.max_connections, "connected to warranty store");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_ACQUIRE_TIMEOUT_SECS",
        "DATABASE_BUSY_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(StoreConfig::from_env(), Ok(StoreConfig::default()));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("DATABASE_URL", "sqlite::memory:");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "12");
        std::env::set_var("DATABASE_BUSY_TIMEOUT_SECS", " 9 ");

        let config = StoreConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
        assert_eq!(config.busy_timeout(), Duration::from_secs(9));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        clear_env();
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "many");
        let err = StoreConfig::from_env().unwrap_err();
        clear_env();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "url": "sqlite://other.db" }"#).unwrap();
        assert_eq!(config.url, "sqlite://other.db");
        assert_eq!(config.max_connections, 5);
    }
}
