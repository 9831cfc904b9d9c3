//! # Analysis Error Types
//!
//! [`AnalysisError`] is what [`AnalysisCache`](crate::AnalysisCache) callers
//! see. [`SourceError`] and [`RepositoryError`] are the contracts for the two
//! injected collaborators.

use plagio_core::DocumentId;
use thiserror::Error;

/// Errors returned by [`AnalysisCache::get_or_compute`](crate::AnalysisCache::get_or_compute).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The document does not exist.
    #[error("document {0} not found")]
    NotFound(DocumentId),

    /// The stored bytes are not decodable text.
    #[error("document {document_id} is not valid UTF-8 text: {reason}")]
    InvalidInput {
        /// The offending document.
        document_id: DocumentId,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The document source could not be reached.
    #[error("document source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The analysis repository could not be read.
    #[error("analysis storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Errors from a [`DocumentSource`](crate::DocumentSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source has no such document.
    #[error("document {0} not found")]
    NotFound(DocumentId),

    /// Transport or storage failure at the source.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Errors from an [`AnalysisRepository`](crate::AnalysisRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backend could not be reached or returned an unexpected error.
    #[error("analysis repository unavailable: {0}")]
    Unavailable(String),
}

impl From<SourceError> for AnalysisError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(id) => Self::NotFound(id),
            SourceError::Unavailable(msg) => Self::UpstreamUnavailable(msg),
        }
    }
}

impl From<RepositoryError> for AnalysisError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => Self::StorageUnavailable(msg),
        }
    }
}
