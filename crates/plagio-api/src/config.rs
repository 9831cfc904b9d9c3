//! # Service Configuration
//!
//! One binary serves three roles. Everything the role needs is read once at
//! startup from environment variables; invalid values abort startup with a
//! [`ConfigError`] instead of falling back silently.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PLAGIO_ROLE` | `file-store` |
//! | `PORT` | `8080` |
//! | `PLAGIO_MAX_UPLOAD_BYTES` | 16 MiB |
//! | `PLAGIO_METRICS_ENABLED` | enabled unless `false` |
//! | `PLAGIO_STORAGE_ROOT` | `/app/files` |
//! | `PLAGIO_ALLOWED_EXTENSIONS` | `.txt` |
//! | `PLAGIO_FINGERPRINT` | `sha256` |
//! | `PLAGIO_IO_TIMEOUT_SECS` | `10` |
//!
//! Upstream service URLs are read by
//! [`ClientConfig::from_env`](plagio_client::ClientConfig::from_env).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use plagio_core::FingerprintAlgorithm;
use plagio_store::{ContentStoreConfig, ExtensionAllowList};
use thiserror::Error;

/// Default request body limit for upload routes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Which service this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Deduplicating file service (`/v1/files`).
    FileStore,
    /// Cached analysis service (`/v1/analyses`).
    Analysis,
    /// Public gateway (`/v1/documents`).
    Gateway,
}

impl Role {
    /// The `PLAGIO_ROLE` spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileStore => "file-store",
            Self::Analysis => "analysis",
            Self::Gateway => "gateway",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file-store" | "files" => Ok(Self::FileStore),
            "analysis" => Ok(Self::Analysis),
            "gateway" => Ok(Self::Gateway),
            _ => Err(ConfigError::InvalidValue {
                var: "PLAGIO_ROLE",
                value: s.to_string(),
                expected: "one of file-store, analysis, gateway",
            }),
        }
    }
}

/// HTTP-level settings shared by every role.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service role.
    pub role: Role,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Request body limit applied to upload routes.
    pub max_upload_bytes: usize,
    /// Whether `/metrics` and the metrics middleware are mounted.
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Defaults for `role`.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            metrics_enabled: true,
        }
    }
}

/// Everything a service process needs apart from upstream URLs.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP settings.
    pub app: AppConfig,
    /// Content store settings (used by the file service only).
    pub store: ContentStoreConfig,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let role = match lookup("PLAGIO_ROLE") {
            Some(raw) => raw.parse()?,
            None => Role::FileStore,
        };

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT, "a port number")?;
        let max_upload_bytes = parse_or(
            "PLAGIO_MAX_UPLOAD_BYTES",
            lookup("PLAGIO_MAX_UPLOAD_BYTES"),
            DEFAULT_MAX_UPLOAD_BYTES,
            "a byte count",
        )?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PLAGIO_MAX_UPLOAD_BYTES",
                value: "0".into(),
                expected: "a positive byte count",
            });
        }
        let metrics_enabled = lookup("PLAGIO_METRICS_ENABLED")
            .map(|v| v.trim() != "false")
            .unwrap_or(true);

        let mut store = ContentStoreConfig::default();
        if let Some(root) = lookup("PLAGIO_STORAGE_ROOT") {
            store.storage_root = PathBuf::from(root);
        }
        if let Some(raw) = lookup("PLAGIO_ALLOWED_EXTENSIONS") {
            store.extension_allow_list = ExtensionAllowList::parse(&raw).map_err(|e| {
                ConfigError::Invalid {
                    var: "PLAGIO_ALLOWED_EXTENSIONS",
                    source: e,
                }
            })?;
        }
        if let Some(raw) = lookup("PLAGIO_FINGERPRINT") {
            store.fingerprint_algorithm =
                FingerprintAlgorithm::from_str(&raw).map_err(|e| ConfigError::Invalid {
                    var: "PLAGIO_FINGERPRINT",
                    source: e,
                })?;
        }
        if let Some(raw) = lookup("PLAGIO_IO_TIMEOUT_SECS") {
            let secs: u64 = parse_or(
                "PLAGIO_IO_TIMEOUT_SECS",
                Some(raw.clone()),
                0,
                "a positive number of seconds",
            )?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "PLAGIO_IO_TIMEOUT_SECS",
                    value: raw,
                    expected: "a positive number of seconds",
                });
            }
            store.io_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            app: AppConfig {
                role,
                port,
                max_upload_bytes,
                metrics_enabled,
            },
            store,
        })
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var,
            value: raw,
            expected,
        }),
    }
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("invalid value for {var}: {value:?} (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A variable parsed but failed domain validation.
    #[error("invalid value for {var}: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: plagio_core::ValidationError,
    },

    /// Upstream client configuration is invalid.
    #[error(transparent)]
    Client(#[from] plagio_client::ConfigError),
}
