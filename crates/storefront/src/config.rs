//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SKETCHSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SKETCHSHOP_PORT` - Listen port (default: 3000)
//! - `SKETCHSHOP_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `SKETCHSHOP_CART_STORAGE` - `file` or `memory` (default: file)
//! - `SKETCHSHOP_DATA_DIR` - Root directory for the file store (default: data/carts)
//! - `SKETCHSHOP_PAYMENT_DELAY_MS` - Simulated payment duration (default: 1500)
//! - `SKETCHSHOP_SHOPPER_IDLE_SECS` - Evict idle shoppers from memory after (default: 1800)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::StorageBackend;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where shopper carts are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartStorageConfig {
    /// One directory per shopper under `data_dir`.
    File { data_dir: PathBuf },
    /// Process memory only; carts are lost on restart.
    Memory,
}

impl CartStorageConfig {
    /// Build the storage backend this configuration describes.
    #[must_use]
    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::File { data_dir } => StorageBackend::file(data_dir),
            Self::Memory => StorageBackend::memory(),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Cart storage backend
    pub cart_storage: CartStorageConfig,
    /// How long the simulated payment takes
    pub payment_delay: Duration,
    /// Idle time after which a shopper's state is dropped from memory
    pub shopper_idle_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            cart_storage: CartStorageConfig::File {
                data_dir: PathBuf::from("data/carts"),
            },
            payment_delay: Duration::from_millis(1500),
            shopper_idle_timeout: Duration::from_secs(30 * 60),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or("SKETCHSHOP_HOST", &lookup, defaults.host)?;
        let port = parse_or("SKETCHSHOP_PORT", &lookup, defaults.port)?;
        let base_url = lookup("SKETCHSHOP_BASE_URL").unwrap_or(defaults.base_url);

        let cart_storage = match lookup("SKETCHSHOP_CART_STORAGE").as_deref() {
            None | Some("file") => CartStorageConfig::File {
                data_dir: lookup("SKETCHSHOP_DATA_DIR")
                    .map_or_else(|| PathBuf::from("data/carts"), PathBuf::from),
            },
            Some("memory") => CartStorageConfig::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SKETCHSHOP_CART_STORAGE".to_string(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };

        let payment_delay = Duration::from_millis(parse_or(
            "SKETCHSHOP_PAYMENT_DELAY_MS",
            &lookup,
            1500_u64,
        )?);
        let shopper_idle_timeout = Duration::from_secs(parse_or(
            "SKETCHSHOP_SHOPPER_IDLE_SECS",
            &lookup,
            defaults.shopper_idle_timeout.as_secs(),
        )?);

        Ok(Self {
            host,
            port,
            base_url,
            cart_storage,
            payment_delay,
            shopper_idle_timeout,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use the default.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.payment_delay, Duration::from_millis(1500));
        assert_eq!(
            config.cart_storage,
            CartStorageConfig::File {
                data_dir: PathBuf::from("data/carts")
            }
        );
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SKETCHSHOP_HOST", "0.0.0.0"),
            ("SKETCHSHOP_PORT", "8080"),
            ("SKETCHSHOP_BASE_URL", "https://sketch.shop"),
            ("SKETCHSHOP_CART_STORAGE", "memory"),
            ("SKETCHSHOP_PAYMENT_DELAY_MS", "10"),
            ("SKETCHSHOP_SHOPPER_IDLE_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.cart_storage, CartStorageConfig::Memory);
        assert_eq!(config.payment_delay, Duration::from_millis(10));
        assert_eq!(config.shopper_idle_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_data_dir_override() {
        let config = load(&[("SKETCHSHOP_DATA_DIR", "/var/lib/sketchshop")]).unwrap();
        assert_eq!(
            config.cart_storage,
            CartStorageConfig::File {
                data_dir: PathBuf::from("/var/lib/sketchshop")
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("SKETCHSHOP_PORT", "not-a-port"),
            ("SKETCHSHOP_HOST", "localhost"),
            ("SKETCHSHOP_CART_STORAGE", "redis"),
            ("SKETCHSHOP_PAYMENT_DELAY_MS", "-1"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == key));
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
