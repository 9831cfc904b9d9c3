//! # File Service Endpoints
//!
//! Deduplicating document storage. Each distinct content is stored once;
//! uploading identical bytes again is rejected with 409 and the fingerprint
//! of the existing content.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/v1/files` | `upload_file` |
//! | `GET` | `/v1/files/:id` | `download_file` |
//! | `GET` | `/v1/files/:id/metadata` | `file_metadata` |

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use plagio_core::DocumentId;
use plagio_store::{StoreError, StoredObject};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{file_response, parse_id, read_upload, UploadResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stored object metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileMetadataResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: DocumentId,
    /// Lowercase hex digest of the stored bytes.
    #[schema(value_type = String)]
    pub fingerprint: String,
    /// File name as uploaded.
    pub display_name: String,
    /// Content-addressed blob name, `{fingerprint}{extension}`.
    pub location: String,
    pub media_type: String,
    pub byte_size: u64,
    pub created_at: DateTime<Utc>,
}

impl From<StoredObject> for FileMetadataResponse {
    fn from(object: StoredObject) -> Self {
        Self {
            id: object.id,
            fingerprint: object.fingerprint.to_string(),
            display_name: object.display_name,
            location: object.location.to_string(),
            media_type: object.media_type,
            byte_size: object.byte_size,
            created_at: object.created_at,
        }
    }
}

/// Build the file service router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/files", post(upload_file))
        .route("/v1/files/:id", get(download_file))
        .route("/v1/files/:id/metadata", get(file_metadata))
}

/// POST /v1/files: Store a document.
#[utoipa::path(
    post,
    path = "/v1/files",
    request_body(content = super::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document stored", body = UploadResponse),
        (status = 400, description = "Missing file field or malformed multipart", body = crate::error::ErrorBody),
        (status = 409, description = "Identical content already stored", body = crate::error::ErrorBody),
        (status = 413, description = "Upload exceeds the size limit", body = crate::error::ErrorBody),
        (status = 422, description = "Empty file or extension not allowed", body = crate::error::ErrorBody),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.require_store()?;
    let upload = read_upload(multipart).await?;

    match store
        .store(&upload.bytes, &upload.file_name, upload.media_type.as_deref())
        .await
    {
        Ok(object) => {
            state.metrics.record_stored();
            Ok((
                StatusCode::CREATED,
                Json(UploadResponse { file_id: object.id }),
            ))
        }
        Err(err @ StoreError::DuplicateContent { .. }) => {
            state.metrics.record_duplicate();
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /v1/files/:id: Download a stored document.
#[utoipa::path(
    get,
    path = "/v1/files/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document bytes with its stored media type"),
        (status = 404, description = "Unknown document", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed identifier", body = crate::error::ErrorBody),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let store = state.require_store()?;
    let id = parse_id(&id)?;
    let object = store.fetch(id).await?;
    Ok(file_response(object.bytes, &object.display_name, &object.media_type))
}

/// GET /v1/files/:id/metadata: Stored object metadata.
#[utoipa::path(
    get,
    path = "/v1/files/{id}/metadata",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Stored object metadata", body = FileMetadataResponse),
        (status = 404, description = "Unknown document", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed identifier", body = crate::error::ErrorBody),
    ),
    tag = "files"
)]
async fn file_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileMetadataResponse>, AppError> {
    let store = state.require_store()?;
    let id = parse_id(&id)?;
    let object = store.describe(id).await?;
    Ok(Json(object.into()))
}
