//! Typed client for the public gateway.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v1/documents` | Upload |
//! | GET    | `/v1/documents/{id}` | Download |
//! | POST   | `/v1/documents/{id}/analysis` | Analyse |

use plagio_core::DocumentId;

use crate::error::ClientError;
use crate::transport;
use crate::types::{AnalysisReply, DownloadedDocument, UploadReceipt};

/// Client for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl GatewayClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Upload a document through the gateway.
    ///
    /// Calls `POST {base_url}/v1/documents`.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        media_type: Option<&str>,
    ) -> Result<DocumentId, ClientError> {
        let endpoint = "POST /v1/documents";
        let url = transport::join(&self.base_url, "v1/documents");
        let form = transport::upload_form(endpoint, bytes, file_name, media_type)?;

        let resp = transport::send(endpoint, self.http.post(&url).multipart(form)).await?;
        let resp = transport::ensure_success(endpoint, resp).await?;
        let receipt: UploadReceipt = transport::read_json(endpoint, resp).await?;
        Ok(receipt.file_id)
    }

    /// Download a document through the gateway.
    ///
    /// Calls `GET {base_url}/v1/documents/{id}`. Returns `None` on 404.
    pub async fn download(&self, id: DocumentId) -> Result<Option<DownloadedDocument>, ClientError> {
        let endpoint = format!("GET /v1/documents/{id}");
        let url = transport::join(&self.base_url, &format!("v1/documents/{id}"));

        let resp = transport::send(&endpoint, self.http.get(&url)).await?;
        match transport::optional(&endpoint, resp).await? {
            Some(resp) => transport::read_document(&endpoint, resp).await.map(Some),
            None => Ok(None),
        }
    }

    /// Analyse a document through the gateway.
    ///
    /// Calls `POST {base_url}/v1/documents/{id}/analysis`. Returns `None` on 404.
    pub async fn analyse(&self, id: DocumentId) -> Result<Option<AnalysisReply>, ClientError> {
        let endpoint = format!("POST /v1/documents/{id}/analysis");
        let url = transport::join(&self.base_url, &format!("v1/documents/{id}/analysis"));

        let resp = transport::send(&endpoint, self.http.post(&url)).await?;
        match transport::optional(&endpoint, resp).await? {
            Some(resp) => transport::read_analysis(&endpoint, resp).await.map(Some),
            None => Ok(None),
        }
    }
}
