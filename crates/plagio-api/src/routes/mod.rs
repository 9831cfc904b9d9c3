//! # API Route Modules
//!
//! - `files`: The deduplicating file service (`/v1/files`), backed by a
//!   [`ContentStore`](plagio_store::ContentStore).
//! - `analyses`: The analysis service (`/v1/analyses`), backed by an
//!   [`AnalysisCache`](plagio_analysis::AnalysisCache).
//! - `gateway`: The public surface (`/v1/documents`), forwarding to the two
//!   services above through `plagio-client`.
//!
//! Helpers shared by more than one role live here: multipart upload parsing,
//! identifier parsing, and the file download response.

pub mod analyses;
pub mod files;
pub mod gateway;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use plagio_core::{DocumentId, DEFAULT_MEDIA_TYPE};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// RFC 5987 `attr-char`: everything else in `filename*` is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Name of the multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Multipart upload body.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// The document. Its file name must carry an accepted extension.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Response to a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Identifier of the newly stored document.
    #[schema(value_type = String, format = Uuid)]
    pub file_id: DocumentId,
}

/// The `file` part of a multipart upload.
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: Option<String>,
}

/// Read the `file` field from a multipart body. Other fields are ignored.
pub(crate) async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedFile, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let media_type = field
            .content_type()
            .map(str::to_string)
            .filter(|mt| !mt.trim().is_empty());
        let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
        return Ok(UploadedFile {
            bytes,
            file_name,
            media_type,
        });
    }

    Err(AppError::BadRequest(format!(
        "multipart field \"{UPLOAD_FIELD}\" is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Parse a path identifier. Malformed identifiers are a validation error.
pub(crate) fn parse_id(raw: &str) -> Result<DocumentId, AppError> {
    raw.parse::<DocumentId>().map_err(AppError::from)
}

/// Serve document bytes as an attachment.
pub(crate) fn file_response(bytes: Vec<u8>, file_name: &str, media_type: &str) -> Response {
    let content_type = HeaderValue::from_str(media_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_MEDIA_TYPE));
    let disposition = HeaderValue::from_str(&content_disposition(file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        bytes,
    )
        .into_response()
}

/// `attachment` with an ASCII `filename`, plus a UTF-8 `filename*` when the
/// ASCII form had to replace characters.
fn content_disposition(file_name: &str) -> String {
    let ascii = header_safe(file_name);
    if ascii == file_name {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            utf8_percent_encode(file_name, ATTR_CHAR)
        )
    }
}

/// Restrict a file name to printable ASCII without quotes or backslashes.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_safe_replaces_quotes_and_non_ascii() {
        assert_eq!(header_safe("essay.txt"), "essay.txt");
        assert_eq!(header_safe("my \"draft\".txt"), "my _draft_.txt");
        assert_eq!(header_safe("résumé.txt"), "r_sum_.txt");
        assert_eq!(header_safe("a\r\nb.txt"), "a__b.txt");
    }

    #[test]
    fn file_response_sets_headers() {
        let resp = file_response(b"hi".to_vec(), "essay.txt", "text/markdown");
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/markdown");
        assert_eq!(
            resp.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"essay.txt\""
        );
    }

    #[test]
    fn non_ascii_name_gets_extended_parameter() {
        let resp = file_response(b"hi".to_vec(), "résumé.txt", "text/plain");
        assert_eq!(
            resp.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"r_sum_.txt\"; filename*=UTF-8''r%C3%A9sum%C3%A9.txt"
        );
    }

    #[test]
    fn extended_parameter_escapes_separators() {
        assert_eq!(
            content_disposition("my \"draft\"; v2.txt"),
            "attachment; filename=\"my _draft_; v2.txt\"; filename*=UTF-8''my%20%22draft%22%3B%20v2.txt"
        );
    }

    #[test]
    fn invalid_media_type_falls_back() {
        let resp = file_response(b"hi".to_vec(), "essay.txt", "text/plain\n");
        assert_eq!(resp.headers()[CONTENT_TYPE], DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("not-a-uuid"), Err(AppError::Validation(_))));
        assert!(parse_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
