//! The fetch capability the cache uses on a miss.

use async_trait::async_trait;
use plagio_core::DocumentId;

use crate::error::SourceError;

/// Retrieves the raw bytes of a stored document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the exact stored bytes of `id`.
    async fn fetch(&self, id: DocumentId) -> Result<Vec<u8>, SourceError>;
}
