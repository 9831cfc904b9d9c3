//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps store, analysis and client errors to HTTP status codes with a JSON
//! body carrying an error code, a message, and optional details. Internal and
//! upstream error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use plagio_analysis::AnalysisError;
use plagio_client::ClientError;
use plagio_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for some client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request content failed validation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed HTTP framing, e.g. an unparseable multipart body (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured upload limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Identical content is already stored (409). Carries the fingerprint.
    #[error("content already stored")]
    DuplicateContent { fingerprint: String },

    /// Conflict reported by an upstream service (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// An upstream service returned an error or is unreachable (502).
    #[error("upstream service error: {0}")]
    UpstreamError(String),

    /// Storage backend unavailable or not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::DuplicateContent { .. } | Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::DuplicateContent { fingerprint } => {
                Some(serde_json::json!({ "fingerprint": fingerprint }))
            }
            _ => None,
        }
    }

    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream/storage error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::UpstreamError(_) => "An upstream service error occurred".to_string(),
            Self::ServiceUnavailable(_) => "Storage is temporarily unavailable".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::UpstreamError(_) => tracing::error!(error = %self, "upstream service error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert plagio-core validation errors to API errors.
impl From<plagio_core::ValidationError> for AppError {
    fn from(err: plagio_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(e) => Self::Validation(e.to_string()),
            StoreError::DuplicateContent { fingerprint } => Self::DuplicateContent {
                fingerprint: fingerprint.to_string(),
            },
            StoreError::NotFound(id) => Self::NotFound(format!("document {id}")),
            StoreError::StorageUnavailable(msg) => Self::ServiceUnavailable(msg),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NotFound(id) => Self::NotFound(format!("document {id}")),
            e @ AnalysisError::InvalidInput { .. } => Self::Validation(e.to_string()),
            AnalysisError::UpstreamUnavailable(msg) => Self::UpstreamError(msg),
            AnalysisError::StorageUnavailable(msg) => Self::ServiceUnavailable(msg),
        }
    }
}

/// Translate an upstream service failure at the gateway.
///
/// Client-meaningful statuses (400, 404, 409, 413, 422) are preserved with the
/// upstream message; everything else becomes 502.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.api_message().unwrap_or_default();
        match err.status() {
            Some(404) => Self::NotFound(message),
            Some(409) => Self::Conflict(message),
            Some(422) => Self::Validation(message),
            Some(400) => Self::BadRequest(message),
            Some(413) => Self::PayloadTooLarge(message),
            _ => Self::UpstreamError(err.to_string()),
        }
    }
}
