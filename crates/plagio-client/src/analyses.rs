//! Typed client for the analysis service.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v1/analyses/{file_id}` | Get or compute the analysis |

use plagio_core::DocumentId;

use crate::error::ClientError;
use crate::transport;
use crate::types::AnalysisReply;

/// Client for the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl AnalysisClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Analyse a stored document.
    ///
    /// Calls `GET {base_url}/v1/analyses/{id}`. Returns `None` on 404.
    pub async fn analyse(&self, id: DocumentId) -> Result<Option<AnalysisReply>, ClientError> {
        let endpoint = format!("GET /v1/analyses/{id}");
        let url = transport::join(&self.base_url, &format!("v1/analyses/{id}"));

        let resp = transport::send(&endpoint, self.http.get(&url)).await?;
        match transport::optional(&endpoint, resp).await? {
            Some(resp) => transport::read_analysis(&endpoint, resp).await.map(Some),
            None => Ok(None),
        }
    }

    /// Readiness check.
    pub async fn ready(&self) -> Result<(), ClientError> {
        let endpoint = "GET /health/readiness";
        let url = transport::join(&self.base_url, "health/readiness");
        let resp = transport::send(endpoint, self.http.get(&url)).await?;
        transport::ensure_success(endpoint, resp).await.map(|_| ())
    }
}
