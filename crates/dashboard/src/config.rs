//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RECDASH_API_BASE_URL` - Recommendation service origin (default: `http://localhost:8000`)
//! - `RECDASH_HOST` - Bind address (default: 127.0.0.1)
//! - `RECDASH_PORT` - Listen port (default: 3000)
//! - `RECDASH_FETCH_LIMIT` - Users/products fetched per list (default: 50, max 1000)
//! - `RECDASH_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `RECDASH_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_FETCH_LIMIT: usize = 50;
const MAX_FETCH_LIMIT: usize = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Recommendation service configuration
    pub api: ApiConfig,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Recommendation service client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base origin every request targets
    pub base_url: Url,
    /// Fixed `limit` used for list users / list products
    pub fetch_limit: usize,
    /// Optional per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    /// Build a configuration for the given origin with default limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("RECDASH_API_BASE_URL", base_url)?,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            request_timeout: None,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "RECDASH_API_BASE_URL",
            &get_env_or_default("RECDASH_API_BASE_URL", DEFAULT_API_BASE_URL),
        )?;
        let fetch_limit = parse_fetch_limit(&get_env_or_default(
            "RECDASH_FETCH_LIMIT",
            &DEFAULT_FETCH_LIMIT.to_string(),
        ))?;
        let request_timeout = get_optional_env("RECDASH_REQUEST_TIMEOUT_SECS")
            .map(|s| parse_timeout(&s))
            .transpose()?;

        Ok(Self {
            base_url,
            fetch_limit,
            request_timeout,
        })
    }
}

impl DashboardConfig {
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

        let host = get_env_or_default("RECDASH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RECDASH_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RECDASH_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RECDASH_PORT".to_string(), e.to_string()))?;
        let api = ApiConfig::from_env()?;
        let log_json = get_optional_env("RECDASH_LOG_JSON").is_some_and(|v| is_truthy(&v));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            api,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable (empty counts as unset).
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse the backend origin. Must be absolute http(s); a trailing slash is
/// added so relative joins keep any path prefix.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not contain a query or fragment".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_fetch_limit(value: &str) -> Result<usize, ConfigError> {
    let limit = value.trim().parse::<usize>().map_err(|e| {
        ConfigError::InvalidEnvVar("RECDASH_FETCH_LIMIT".to_string(), e.to_string())
    })?;
    if limit == 0 || limit > MAX_FETCH_LIMIT {
        return Err(ConfigError::InvalidEnvVar(
            "RECDASH_FETCH_LIMIT".to_string(),
            format!("must be between 1 and {MAX_FETCH_LIMIT} (got {limit})"),
        ));
    }
    Ok(limit)
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let secs = value.trim().parse::<u64>().map_err(|e| {
        ConfigError::InvalidEnvVar("RECDASH_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "RECDASH_REQUEST_TIMEOUT_SECS".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
