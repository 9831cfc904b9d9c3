//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes of all three roles into one
//! OpenAPI 3.1 document, served at `/openapi.json` by every role.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the Plagio services.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Plagio API",
        version = "0.1.0",
        description = "Deduplicating text store with cached structural analysis.\n\nOne binary, three roles selected by `PLAGIO_ROLE`:\n- **file-store** serves `/v1/files`\n- **analysis** serves `/v1/analyses`\n- **gateway** serves `/v1/documents` and forwards to the other two\n\nHealth checks (`/health/*`) and `/metrics` are served by every role.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── File service ─────────────────────────────────────────────────
        crate::routes::files::upload_file,
        crate::routes::files::download_file,
        crate::routes::files::file_metadata,
        // ── Analysis service ─────────────────────────────────────────────
        crate::routes::analyses::get_analysis,
        // ── Gateway ──────────────────────────────────────────────────────
        crate::routes::gateway::upload_document,
        crate::routes::gateway::download_document,
        crate::routes::gateway::analyse_document,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::UploadForm,
        crate::routes::UploadResponse,
        crate::routes::files::FileMetadataResponse,
        crate::routes::analyses::AnalysisResponse,
    )),
    tags(
        (name = "files", description = "Deduplicating file service: store once, fetch by identifier"),
        (name = "analyses", description = "Analysis service: paragraph, word and character counts, computed once per document"),
        (name = "documents", description = "Public gateway forwarding to the file and analysis services"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_generates_successfully() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Plagio API");
    }

    #[test]
    fn openapi_spec_has_every_role() {
        let spec = ApiDoc::openapi();
        for path in [
            "/v1/files",
            "/v1/files/{id}",
            "/v1/files/{id}/metadata",
            "/v1/analyses/{file_id}",
            "/v1/documents",
            "/v1/documents/{id}",
            "/v1/documents/{id}/analysis",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_spec_has_error_schema() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("components present");
        assert!(components.schemas.contains_key("ErrorBody"));
        assert!(components.schemas.contains_key("AnalysisResponse"));
    }
}
