//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LAKKERIET_DATABASE_URL` - `SQLite` connection string (e.g. `sqlite://lakkeriet.db`)
//!
//! ## Optional
//! - `LAKKERIET_HOST` - Bind address (default: 127.0.0.1)
//! - `LAKKERIET_PORT` - Listen port (default: 3000)
//! - `LAKKERIET_CURRENCY` - Currency code stamped onto orders (default: NOK)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Default currency for order totals.
const DEFAULT_CURRENCY: &str = "NOK";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `SQLite` database connection URL.
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Currency code stamped onto new orders.
    pub currency: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is absent,
    /// or `ConfigError::InvalidEnvVar` if a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_env("LAKKERIET_DATABASE_URL")?;

        let host = optional_env("LAKKERIET_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LAKKERIET_HOST".to_owned(), e.to_string()))?;

        let port = optional_env("LAKKERIET_PORT")
            .unwrap_or_else(|| "3000".to_owned())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("LAKKERIET_PORT".to_owned(), e.to_string()))?;

        let currency =
            optional_env("LAKKERIET_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            currency,
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read a required environment variable.
fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

/// Read an optional environment variable, treating empty values as absent.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
