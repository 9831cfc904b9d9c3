//! Client configuration.
//!
//! Base URLs for each Plagio service. Defaults match the service names in
//! the container network. Override via environment variables or explicit
//! construction for tests.

use url::Url;

/// Default file service base URL.
pub const DEFAULT_FILE_SERVICE_URL: &str = "http://file-storing-service";
/// Default analysis service base URL.
pub const DEFAULT_ANALYSIS_SERVICE_URL: &str = "http://file-analysis-service";
/// Default gateway base URL.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";
/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to Plagio services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the file service.
    pub file_service_url: Url,
    /// Base URL of the analysis service.
    pub analysis_service_url: Url,
    /// Base URL of the public gateway.
    pub gateway_url: Url,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PLAGIO_FILE_SERVICE_URL` (default: `http://file-storing-service`)
    /// - `PLAGIO_ANALYSIS_SERVICE_URL` (default: `http://file-analysis-service`)
    /// - `PLAGIO_GATEWAY_URL` (default: `http://localhost:8080`)
    /// - `PLAGIO_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            file_service_url: env_url("PLAGIO_FILE_SERVICE_URL", DEFAULT_FILE_SERVICE_URL)?,
            analysis_service_url: env_url(
                "PLAGIO_ANALYSIS_SERVICE_URL",
                DEFAULT_ANALYSIS_SERVICE_URL,
            )?,
            gateway_url: env_url("PLAGIO_GATEWAY_URL", DEFAULT_GATEWAY_URL)?,
            timeout_secs: env_secs("PLAGIO_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Point every service at the same base URL (single-process tests).
    pub fn single(base_url: Url, timeout_secs: u64) -> Self {
        Self {
            file_service_url: base_url.clone(),
            analysis_service_url: base_url.clone(),
            gateway_url: base_url,
            timeout_secs,
        }
    }
}

/// Read a URL from `var`, falling back to `default`.
pub fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_secs(var: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidNumber(var.to_string(), raw)),
        },
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1:?} (expected a positive integer)")]
    InvalidNumber(String, String),
}
