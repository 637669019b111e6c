//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `QUICKBITE_HOST` - Bind address (default: 127.0.0.1)
//! - `QUICKBITE_PORT` - Listen port (default: 3000)
//! - `QUICKBITE_DATA_DIR` - Directory for persisted cart state (default: data)
//! - `QUICKBITE_DELIVERY_FEE` - Flat delivery fee in dollars (default: 2.99)
//! - `QUICKBITE_TRACKING_INTERVAL_SECS` - Seconds between order stages (default: 3)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use quickbite_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_DELIVERY_FEE: &str = "2.99";
const DEFAULT_TRACKING_INTERVAL_SECS: &str = "3";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the persisted cart and favorites blobs
    pub data_dir: PathBuf,
    /// Flat delivery fee added to every order
    pub delivery_fee: Price,
    /// Time between simulated order stages
    pub tracking_interval: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var::<IpAddr>("QUICKBITE_HOST", &get("QUICKBITE_HOST", DEFAULT_HOST))?;
        let port = parse_var::<u16>("QUICKBITE_PORT", &get("QUICKBITE_PORT", DEFAULT_PORT))?;
        let data_dir = PathBuf::from(get("QUICKBITE_DATA_DIR", DEFAULT_DATA_DIR));

        let fee = parse_var::<Decimal>(
            "QUICKBITE_DELIVERY_FEE",
            &get("QUICKBITE_DELIVERY_FEE", DEFAULT_DELIVERY_FEE),
        )?;
        if fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "QUICKBITE_DELIVERY_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let interval_secs = parse_var::<u64>(
            "QUICKBITE_TRACKING_INTERVAL_SECS",
            &get(
                "QUICKBITE_TRACKING_INTERVAL_SECS",
                DEFAULT_TRACKING_INTERVAL_SECS,
            ),
        )?;
        if interval_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "QUICKBITE_TRACKING_INTERVAL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            data_dir,
            delivery_fee: Price::new(fee),
            tracking_interval: Duration::from_secs(interval_secs),
            sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|s| !s.is_empty()),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse `value` for variable `key`, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
