//! [`DocumentSource`] over the file service HTTP API.

use async_trait::async_trait;
use plagio_analysis::{DocumentSource, SourceError};
use plagio_client::FileStoreClient;
use plagio_core::DocumentId;

/// Fetches document bytes from the file service.
///
/// A 404 from the file service is [`SourceError::NotFound`]; every other
/// failure (transport, timeout, 5xx) is [`SourceError::Unavailable`].
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    files: FileStoreClient,
}

impl HttpDocumentSource {
    pub fn new(files: FileStoreClient) -> Self {
        Self { files }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, id: DocumentId) -> Result<Vec<u8>, SourceError> {
        match self.files.fetch(id).await {
            Ok(Some(doc)) => Ok(doc.bytes),
            Ok(None) => Err(SourceError::NotFound(id)),
            Err(e) => Err(SourceError::Unavailable(e.to_string())),
        }
    }
}
