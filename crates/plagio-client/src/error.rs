//! Client error types.

use serde::Deserialize;

/// Errors from Plagio service calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ClientError {
    /// The HTTP status the service answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service's own error message, extracted from the standard
    /// `{"error":{"message"}}` body when present.
    pub fn api_message(&self) -> Option<String> {
        match self {
            Self::ApiError { body, .. } => Some(
                serde_json::from_str::<ErrorEnvelope>(body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| body.clone()),
            ),
            _ => None,
        }
    }
}
