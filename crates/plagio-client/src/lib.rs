//! # plagio-client: Typed client for Plagio services
//!
//! One `reqwest::Client` shared by three sub-clients:
//! - **Files** ([`FileStoreClient`]) for the file service (`/v1/files`)
//! - **Analyses** ([`AnalysisClient`]) for the analysis service (`/v1/analyses`)
//! - **Gateway** ([`GatewayClient`]) for the public gateway (`/v1/documents`)
//!
//! The analysis service uses the files client to fetch bytes on a cache miss;
//! the gateway uses the files and analyses clients to forward requests; the
//! CLI uses the gateway client.
//!
//! Requests are not retried. A transport failure or timeout is returned to
//! the caller as [`ClientError::Http`].

pub mod analyses;
pub mod config;
pub mod error;
pub mod files;
pub mod gateway;
mod transport;
pub mod types;

pub use analyses::AnalysisClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use files::FileStoreClient;
pub use gateway::GatewayClient;
pub use types::{
    AnalysisReply, AnalysisReport, DocumentMetadata, DownloadedDocument, UploadReceipt,
    ANALYSIS_CACHE_HEADER,
};

use std::time::Duration;

/// Top-level client. Holds one sub-client per service.
#[derive(Debug, Clone)]
pub struct PlagioClient {
    files: FileStoreClient,
    analyses: AnalysisClient,
    gateway: GatewayClient,
}

impl PlagioClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("plagio-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            files: FileStoreClient::new(http.clone(), config.file_service_url),
            analyses: AnalysisClient::new(http.clone(), config.analysis_service_url),
            gateway: GatewayClient::new(http, config.gateway_url),
        })
    }

    /// Access the file service client.
    pub fn files(&self) -> &FileStoreClient {
        &self.files
    }

    /// Access the analysis service client.
    pub fn analyses(&self) -> &AnalysisClient {
        &self.analyses
    }

    /// Access the gateway client.
    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }
}
