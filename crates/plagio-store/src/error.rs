//! # Store Error Types
//!
//! [`StoreError`] is the taxonomy surfaced to callers of
//! [`ContentStore`](crate::ContentStore). [`CatalogError`] and [`BlobError`]
//! are the backend-facing errors; they are translated at the store boundary
//! so that a lost uniqueness race reads exactly like the pre-check path.

use plagio_core::{DocumentId, Fingerprint, ValidationError};
use thiserror::Error;

/// Errors returned by [`ContentStore`](crate::ContentStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Empty payload, missing or disallowed extension. Caller error.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Identical content is already stored. No new identifier was minted.
    #[error("content already stored under fingerprint {fingerprint}")]
    DuplicateContent {
        /// Fingerprint shared by the upload and the existing object.
        fingerprint: Fingerprint,
    },

    /// No retrievable object for this identifier.
    #[error("document {0} not found")]
    NotFound(DocumentId),

    /// The catalog or blob medium failed or timed out.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Errors from an [`ObjectCatalog`](crate::ObjectCatalog) backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The fingerprint uniqueness constraint rejected the insert.
    #[error("fingerprint {0} already recorded")]
    DuplicateFingerprint(Fingerprint),

    /// The backend could not be reached or returned an unexpected error.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors from a [`BlobStore`](crate::BlobStore) backend.
#[derive(Error, Debug)]
pub enum BlobError {
    /// Filesystem failure.
    #[error("blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CatalogError> for StoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DuplicateFingerprint(fingerprint) => Self::DuplicateContent { fingerprint },
            CatalogError::Unavailable(msg) => Self::StorageUnavailable(msg),
        }
    }
}

impl From<BlobError> for StoreError {
    fn from(err: BlobError) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}
