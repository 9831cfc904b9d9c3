//! Request and response shapes shared by the Plagio services.

use chrono::{DateTime, Utc};
use plagio_core::{DocumentId, Fingerprint};
use serde::{Deserialize, Serialize};

/// Response header carrying the analysis cache disposition
/// (`hit`, `stored` or `not-stored`).
pub const ANALYSIS_CACHE_HEADER: &str = "x-analysis-cache";

/// Body of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub file_id: DocumentId,
}

/// Stored object metadata as served by `GET /v1/files/:id/metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: DocumentId,
    pub fingerprint: Fingerprint,
    pub display_name: String,
    pub location: String,
    pub media_type: String,
    pub byte_size: u64,
    pub created_at: DateTime<Utc>,
}

/// A downloaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedDocument {
    pub bytes: Vec<u8>,
    /// From `Content-Disposition`, when the service sent one.
    pub file_name: Option<String>,
    /// From `Content-Type`.
    pub media_type: Option<String>,
}

/// Analysis record as served by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub document_id: DocumentId,
    pub paragraph_count: u64,
    pub word_count: u64,
    pub character_count: u64,
    pub computed_at: DateTime<Utc>,
}

/// An analysis plus the cache disposition header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReply {
    pub report: AnalysisReport,
    /// Value of [`ANALYSIS_CACHE_HEADER`], if present.
    pub cache_status: Option<String>,
}
