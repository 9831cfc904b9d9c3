//! Typed client for the file service.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v1/files` | Upload (multipart field `file`) |
//! | GET    | `/v1/files/{id}` | Download bytes |
//! | GET    | `/v1/files/{id}/metadata` | Stored object metadata |

use plagio_core::DocumentId;

use crate::error::ClientError;
use crate::transport;
use crate::types::{DocumentMetadata, DownloadedDocument, UploadReceipt};

/// Client for the file service.
#[derive(Debug, Clone)]
pub struct FileStoreClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl FileStoreClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Upload a document.
    ///
    /// Calls `POST {base_url}/v1/files`. A duplicate is reported as
    /// [`ClientError::ApiError`] with status 409.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        media_type: Option<&str>,
    ) -> Result<DocumentId, ClientError> {
        let endpoint = "POST /v1/files";
        let url = transport::join(&self.base_url, "v1/files");
        let form = transport::upload_form(endpoint, bytes, file_name, media_type)?;

        let resp = transport::send(endpoint, self.http.post(&url).multipart(form)).await?;
        let resp = transport::ensure_success(endpoint, resp).await?;
        let receipt: UploadReceipt = transport::read_json(endpoint, resp).await?;
        Ok(receipt.file_id)
    }

    /// Download a document's bytes.
    ///
    /// Calls `GET {base_url}/v1/files/{id}`. Returns `None` on 404.
    pub async fn fetch(&self, id: DocumentId) -> Result<Option<DownloadedDocument>, ClientError> {
        let endpoint = format!("GET /v1/files/{id}");
        let url = transport::join(&self.base_url, &format!("v1/files/{id}"));

        let resp = transport::send(&endpoint, self.http.get(&url)).await?;
        match transport::optional(&endpoint, resp).await? {
            Some(resp) => transport::read_document(&endpoint, resp).await.map(Some),
            None => Ok(None),
        }
    }

    /// Stored object metadata.
    ///
    /// Calls `GET {base_url}/v1/files/{id}/metadata`. Returns `None` on 404.
    pub async fn metadata(&self, id: DocumentId) -> Result<Option<DocumentMetadata>, ClientError> {
        let endpoint = format!("GET /v1/files/{id}/metadata");
        let url = transport::join(&self.base_url, &format!("v1/files/{id}/metadata"));

        let resp = transport::send(&endpoint, self.http.get(&url)).await?;
        match transport::optional(&endpoint, resp).await? {
            Some(resp) => transport::read_json(&endpoint, resp).await.map(Some),
            None => Ok(None),
        }
    }

    /// Readiness check.
    ///
    /// Calls `GET {base_url}/health/readiness`.
    pub async fn ready(&self) -> Result<(), ClientError> {
        let endpoint = "GET /health/readiness";
        let url = transport::join(&self.base_url, "health/readiness");
        let resp = transport::send(endpoint, self.http.get(&url)).await?;
        transport::ensure_success(endpoint, resp).await.map(|_| ())
    }
}
