//! # Analysis Service Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/v1/analyses/:file_id` | `get_analysis` |
//!
//! The first request for a document fetches its bytes from the file service,
//! counts, and persists the record; later requests are answered from the
//! persisted record. The `x-analysis-cache` response header says which
//! happened (`hit`, `stored`, or `not-stored` when the result could not be
//! persisted and is not guaranteed cached).

use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use plagio_analysis::AnalysisRecord;
use plagio_client::{AnalysisReport, ANALYSIS_CACHE_HEADER};
use plagio_core::DocumentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parse_id;
use crate::error::AppError;
use crate::state::AppState;

/// Structural counts for one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    #[schema(value_type = String, format = Uuid)]
    pub document_id: DocumentId,
    /// Non-empty line-break-delimited segments.
    pub paragraph_count: u64,
    /// Whitespace-delimited tokens.
    pub word_count: u64,
    /// UTF-16 code units.
    pub character_count: u64,
    pub computed_at: DateTime<Utc>,
}

impl From<AnalysisRecord> for AnalysisResponse {
    fn from(r: AnalysisRecord) -> Self {
        Self {
            document_id: r.document_id,
            paragraph_count: r.paragraph_count,
            word_count: r.word_count,
            character_count: r.character_count,
            computed_at: r.computed_at,
        }
    }
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(r: AnalysisReport) -> Self {
        Self {
            document_id: r.document_id,
            paragraph_count: r.paragraph_count,
            word_count: r.word_count,
            character_count: r.character_count,
            computed_at: r.computed_at,
        }
    }
}

/// An analysis body with its cache disposition header.
pub(crate) fn analysis_response(body: AnalysisResponse, cache_status: Option<&str>) -> Response {
    let header = cache_status.and_then(|s| HeaderValue::from_str(s).ok());
    let mut response = Json(body).into_response();
    if let Some(value) = header {
        response
            .headers_mut()
            .insert(HeaderName::from_static(ANALYSIS_CACHE_HEADER), value);
    }
    response
}

/// Build the analysis service router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/analyses/:file_id", get(get_analysis))
}

/// GET /v1/analyses/:file_id: Get or compute a document's analysis.
#[utoipa::path(
    get,
    path = "/v1/analyses/{file_id}",
    params(("file_id" = String, Path, description = "Document identifier issued by the file service")),
    responses(
        (status = 200, description = "Analysis; see the x-analysis-cache header", body = AnalysisResponse),
        (status = 404, description = "Unknown document", body = crate::error::ErrorBody),
        (status = 422, description = "Document is not valid UTF-8 text, or malformed identifier", body = crate::error::ErrorBody),
        (status = 502, description = "File service unreachable", body = crate::error::ErrorBody),
        (status = 503, description = "Analysis storage unavailable", body = crate::error::ErrorBody),
    ),
    tag = "analyses"
)]
async fn get_analysis(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, AppError> {
    let (cache, source) = state.require_analysis()?;
    let id = parse_id(&file_id)?;

    let outcome = cache.get_or_compute(id, source).await?;
    state.metrics.record_analysis(outcome.status);

    Ok(analysis_response(
        outcome.record.into(),
        Some(outcome.status.as_str()),
    ))
}
