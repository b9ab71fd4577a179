//! Server configuration read from environment variables.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default: `8`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8080`)

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Backing store for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local store, emptied on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` store.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` names an unknown store.
    #[error("invalid STORAGE_MODE '{0}', expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while the `PostgreSQL` store is selected.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A numeric variable could not be parsed.
    #[error("invalid {name} '{value}': {reason}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Selected store.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub database_pool_size: u32,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            database_pool_size: DEFAULT_POOL_SIZE,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for unparseable values or a missing
    /// `DATABASE_URL` in `postgres` mode.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through a variable lookup.
    ///
    /// Empty and whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for unparseable values or a missing
    /// `DATABASE_URL` in `postgres` mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let database_pool_size = parse_number("DATABASE_POOL_SIZE", read("DATABASE_POOL_SIZE"))?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let port = parse_number("PORT", read("PORT"))?.unwrap_or(DEFAULT_PORT);

        let config = Self {
            storage_mode,
            database_url: read("DATABASE_URL"),
            database_pool_size,
            host: read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when `postgres`
    /// mode has no connection URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// Address the server listens on.
    #[must_use]
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn parse_number<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|err| ConfigurationError::InvalidNumber {
                name,
                reason: err.to_string(),
                value,
            })
    })
    .transpose()
}
