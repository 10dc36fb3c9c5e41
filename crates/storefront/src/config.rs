//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `KITZZ_HOST` - Bind address (default: 127.0.0.1)
//! - `KITZZ_PORT` - Listen port (default: 8000)
//! - `KITZZ_BASE_URL` - Public URL (default: `http://localhost:8000`); an
//!   `https` URL enables secure session cookies
//! - `KITZZ_APP_NAME` - Displayed application name (default: kitzz)
//! - `KITZZ_DEV_SELLER` - Username acting as the seller when no session
//!   identity is present
//! - `KITZZ_SEED_DEMO_DATA` - Load the demo dataset on startup (default: true)
//! - `KITZZ_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use kitzz_core::Username;

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
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Name shown in page titles and the header
    pub app_name: String,
    /// Fallback seller identity for local development
    pub dev_seller: Option<Username>,
    /// Whether to seed the demo dataset on startup
    pub seed_demo_data: bool,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<SecretString>,
    pub environment: Option<String>,
    pub traces_sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
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
        let env = Lookup(&lookup);

        let host = env
            .or_default("KITZZ_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("KITZZ_HOST", e))?;
        let port = env
            .or_default("KITZZ_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| invalid("KITZZ_PORT", e))?;
        let base_url = Url::parse(&env.or_default("KITZZ_BASE_URL", "http://localhost:8000"))
            .map_err(|e| invalid("KITZZ_BASE_URL", e))?;
        let dev_seller = env
            .optional("KITZZ_DEV_SELLER")
            .map(|name| Username::parse(&name))
            .transpose()
            .map_err(|e| invalid("KITZZ_DEV_SELLER", e))?;
        let seed_demo_data = parse_bool(
            "KITZZ_SEED_DEMO_DATA",
            &env.or_default("KITZZ_SEED_DEMO_DATA", "true"),
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            app_name: env.or_default("KITZZ_APP_NAME", "kitzz"),
            dev_seller,
            seed_demo_data,
            static_dir: PathBuf::from(env.or_default("KITZZ_STATIC_DIR", "crates/storefront/static")),
            sentry: SentryConfig::from_lookup(&env)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl SentryConfig {
    fn from_lookup(env: &Lookup<'_>) -> Result<Self, ConfigError> {
        let traces_sample_rate = env
            .or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| invalid("SENTRY_TRACES_SAMPLE_RATE", e))?;
        if !(0.0..=1.0).contains(&traces_sample_rate) {
            return Err(invalid(
                "SENTRY_TRACES_SAMPLE_RATE",
                "must be between 0.0 and 1.0",
            ));
        }

        Ok(Self {
            dsn: env.optional("SENTRY_DSN").map(SecretString::from),
            environment: env.optional("SENTRY_ENVIRONMENT"),
            traces_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Lookup<'_> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("expected a boolean, got '{other}'"))),
    }
}
