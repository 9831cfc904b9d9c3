//! Request plumbing shared by the sub-clients.

use percent_encoding::percent_decode_str;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ClientError;
use crate::types::{AnalysisReply, DownloadedDocument, ANALYSIS_CACHE_HEADER};

/// `{base_url}/{path}` regardless of whether the base has a trailing slash.
pub(crate) fn join(base_url: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub(crate) async fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, ClientError> {
    request.send().await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, "request failed");
        ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        }
    })
}

/// Turn a non-2xx response into [`ClientError::ApiError`].
pub(crate) async fn ensure_success(endpoint: &str, resp: Response) -> Result<Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::ApiError {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    resp: Response,
) -> Result<T, ClientError> {
    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// `None` on 404, otherwise the checked response.
pub(crate) async fn optional(endpoint: &str, resp: Response) -> Result<Option<Response>, ClientError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    ensure_success(endpoint, resp).await.map(Some)
}

pub(crate) async fn read_document(
    endpoint: &str,
    resp: Response,
) -> Result<DownloadedDocument, ClientError> {
    let file_name = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(disposition_file_name);
    let media_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })?
        .to_vec();
    Ok(DownloadedDocument {
        bytes,
        file_name,
        media_type,
    })
}

pub(crate) async fn read_analysis(endpoint: &str, resp: Response) -> Result<AnalysisReply, ClientError> {
    let cache_status = resp
        .headers()
        .get(ANALYSIS_CACHE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let report = read_json(endpoint, resp).await?;
    Ok(AnalysisReply {
        report,
        cache_status,
    })
}

/// Multipart form with the document in field `file`.
pub(crate) fn upload_form(
    endpoint: &str,
    bytes: Vec<u8>,
    file_name: &str,
    media_type: Option<&str>,
) -> Result<Form, ClientError> {
    let part = Part::bytes(bytes).file_name(file_name.to_string());
    let part = match media_type {
        Some(mt) => part.mime_str(mt).map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?,
        None => part,
    };
    Ok(Form::new().part("file", part))
}

/// File name from a `Content-Disposition` value.
///
/// Prefers the RFC 5987 `filename*=UTF-8''…` parameter, which carries
/// names the plain `filename="…"` parameter cannot.
pub(crate) fn disposition_file_name(value: &str) -> Option<String> {
    let params: Vec<&str> = value.split(';').map(str::trim).collect();
    params
        .iter()
        .find_map(|param| extended_file_name(param))
        .or_else(|| {
            params.iter().find_map(|param| {
                let raw = param.strip_prefix("filename=")?;
                let name = raw.trim_matches('"').replace("\\\"", "\"");
                (!name.is_empty()).then_some(name)
            })
        })
}

fn extended_file_name(param: &str) -> Option<String> {
    let raw = param.strip_prefix("filename*=")?;
    let mut parts = raw.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    let name = percent_decode_str(encoded).decode_utf8().ok()?.into_owned();
    (!name.is_empty()).then_some(name)
}
