//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_CATALOG_PATH` - Path to the CMS product export (JSON)
//! - `WHATSAPP_NUMBER` - Store WhatsApp number in international format (e.g., +91 98765 43210)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL used in checkout messages (default: `http://localhost:3000`)
//! - `LISTING_CACHE_TTL_SECS` - Listing cache time-to-live (default: 300)
//! - `LISTING_CACHE_CAPACITY` - Maximum cached listings (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::checkout::WhatsAppCheckout;

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
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// CMS product export
    pub catalog_path: PathBuf,
    /// Store WhatsApp number, normalized to digits
    pub whatsapp_number: String,
    /// Listing response cache settings
    pub listing_cache: ListingCacheConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Listing cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct ListingCacheConfig {
    pub ttl: Duration,
    pub capacity: u64,
}

impl Default for ListingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            capacity: 1_000,
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
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let whatsapp_raw = env.required("WHATSAPP_NUMBER")?;
        let whatsapp_number = WhatsAppCheckout::new(&whatsapp_raw)
            .map_err(|e| ConfigError::InvalidEnvVar("WHATSAPP_NUMBER".to_string(), e.to_string()))?
            .number()
            .to_string();

        let listing_cache = ListingCacheConfig {
            ttl: Duration::from_secs(env.parsed_or("LISTING_CACHE_TTL_SECS", 300)?),
            capacity: env.parsed_or("LISTING_CACHE_CAPACITY", 1_000)?,
        };

        Ok(Self {
            host: env.parsed_or("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parsed_or("STOREFRONT_PORT", 3000)?,
            base_url: env
                .or_default("STOREFRONT_BASE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            catalog_path: PathBuf::from(env.required("STOREFRONT_CATALOG_PATH")?),
            whatsapp_number,
            listing_cache,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.rate_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.rate_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Checkout link builder for the configured number.
    ///
    /// # Errors
    ///
    /// Returns an error only if the stored number was altered after loading.
    pub fn checkout(&self) -> Result<WhatsAppCheckout, crate::checkout::CheckoutError> {
        WhatsAppCheckout::new(&self.whatsapp_number).map(|c| c.with_base_url(&self.base_url))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a sample rate in `[0, 1]`.
    fn rate_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let rate = self.parsed_or(key, default)?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0 and 1 (got {rate})"),
            ))
        }
    }
}
