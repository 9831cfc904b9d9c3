//! # Gateway Endpoints
//!
//! The public surface. Every request is forwarded to the file service or the
//! analysis service through `plagio-client`; the gateway holds no state of
//! its own.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/documents` | `upload_document` |
//! | `GET` | `/v1/documents/:id` | `download_document` |
//! | `POST` | `/v1/documents/:id/analysis` | `analyse_document` |
//! | `GET` | `/v1/documents/:id/analysis` | `analyse_document` |
//!
//! Upstream 400, 404, 409, 413 and 422 answers keep their status and message.
//! Any other upstream failure is reported as 502.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use plagio_core::{ValidationError, DEFAULT_MEDIA_TYPE};

use super::analyses::analysis_response;
use super::{file_response, parse_id, read_upload, UploadResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Build the gateway router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/documents", post(upload_document))
        .route("/v1/documents/:id", get(download_document))
        .route(
            "/v1/documents/:id/analysis",
            post(analyse_document).get(analyse_document),
        )
}

/// POST /v1/documents: Upload a document.
#[utoipa::path(
    post,
    path = "/v1/documents",
    request_body(content = super::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document stored", body = UploadResponse),
        (status = 400, description = "Missing file field or malformed multipart", body = crate::error::ErrorBody),
        (status = 409, description = "Identical content already stored", body = crate::error::ErrorBody),
        (status = 422, description = "Empty file or extension not allowed", body = crate::error::ErrorBody),
        (status = 502, description = "File service failure", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let upstream = state.require_upstream()?;
    let upload = read_upload(multipart).await?;
    if upload.bytes.is_empty() {
        return Err(ValidationError::EmptyContent.into());
    }

    let file_id = upstream
        .files()
        .upload(upload.bytes, &upload.file_name, upload.media_type.as_deref())
        .await?;

    tracing::info!(document_id = %file_id, file_name = %upload.file_name, "document uploaded via gateway");
    Ok((StatusCode::CREATED, Json(UploadResponse { file_id })))
}

/// GET /v1/documents/:id: Download a document.
#[utoipa::path(
    get,
    path = "/v1/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document bytes with name and media type"),
        (status = 404, description = "Unknown document", body = crate::error::ErrorBody),
        (status = 502, description = "File service failure", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let upstream = state.require_upstream()?;
    let id = parse_id(&id)?;

    let doc = upstream
        .files()
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;

    let file_name = doc.file_name.unwrap_or_else(|| format!("{id}.txt"));
    let media_type = doc
        .media_type
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
    Ok(file_response(doc.bytes, &file_name, &media_type))
}

/// POST or GET /v1/documents/:id/analysis: Analyse a document.
#[utoipa::path(
    post,
    path = "/v1/documents/{id}/analysis",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Analysis; see the x-analysis-cache header", body = super::analyses::AnalysisResponse),
        (status = 404, description = "Unknown document", body = crate::error::ErrorBody),
        (status = 422, description = "Document is not valid UTF-8 text", body = crate::error::ErrorBody),
        (status = 502, description = "Analysis service failure", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn analyse_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let upstream = state.require_upstream()?;
    let id = parse_id(&id)?;

    let reply = upstream
        .analyses()
        .analyse(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;

    Ok(analysis_response(
        reply.report.into(),
        reply.cache_status.as_deref(),
    ))
}
