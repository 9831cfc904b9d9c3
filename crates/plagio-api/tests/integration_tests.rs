//! # Integration Tests for plagio-api
//!
//! File service and analysis service routes are driven in-process with
//! `oneshot`. The analysis service talks to a wiremock file service. The
//! gateway is tested end to end against real file and analysis services bound
//! to ephemeral ports.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plagio_analysis::{AnalysisCache, MemoryAnalysisRepository};
use plagio_api::config::{AppConfig, Role};
use plagio_api::source::HttpDocumentSource;
use plagio_api::state::AppState;
use plagio_client::{ClientConfig, PlagioClient};
use plagio_store::{ContentStore, ContentStoreConfig, MemoryCatalog};

const BOUNDARY: &str = "plagio-test-boundary";
const UNKNOWN_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

// -- Helpers ------------------------------------------------------------------

/// Helper: file service state over a temporary blob root.
fn file_store_state(dir: &tempfile::TempDir, config: AppConfig) -> AppState {
    let store_config = ContentStoreConfig {
        storage_root: dir.path().to_path_buf(),
        ..ContentStoreConfig::default()
    };
    let store = ContentStore::new(store_config, Arc::new(MemoryCatalog::new()));
    AppState::file_store(config, store)
}

fn file_store_app(dir: &tempfile::TempDir) -> (Router, AppState) {
    let state = file_store_state(dir, AppConfig::for_role(Role::FileStore));
    (plagio_api::app(state.clone()), state)
}

fn client_config(files: url::Url, analyses: url::Url) -> ClientConfig {
    ClientConfig {
        file_service_url: files,
        analysis_service_url: analyses.clone(),
        gateway_url: analyses,
        timeout_secs: 5,
    }
}

/// Helper: analysis service fetching from `file_service`.
fn analysis_app(file_service: url::Url) -> (Router, AppState) {
    let client = PlagioClient::new(client_config(file_service.clone(), file_service)).unwrap();
    let source = HttpDocumentSource::new(client.files().clone());
    let cache = AnalysisCache::new(Arc::new(MemoryAnalysisRepository::new()));
    let state = AppState::analysis(AppConfig::for_role(Role::Analysis), cache, Arc::new(source));
    (plagio_api::app(state.clone()), state)
}

/// Helper: serve `app` on an ephemeral port.
async fn spawn(app: Router) -> url::Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}").parse().unwrap()
}

fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(uri: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    upload_field_request(uri, "file", file_name, bytes)
}

fn upload_field_request(uri: &str, field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, file_name, "text/plain", bytes)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper: read response body as bytes.
async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn upload_ok(app: &Router, uri: &str, file_name: &str, bytes: &[u8]) -> String {
    let response = app
        .clone()
        .oneshot(upload_request(uri, file_name, bytes))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["file_id"]
        .as_str()
        .unwrap()
        .to_string()
}

// -- Health Checks ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_and_readiness_checks() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let response = app.clone().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_openapi_served_by_every_role() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/documents"].is_object());
}

// -- File Service -------------------------------------------------------------

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let id = upload_ok(&app, "/v1/files", "essay.txt", b"line1\n\nline2").await;

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/files/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"essay.txt\""
    );
    assert_eq!(body_bytes(response).await, b"line1\n\nline2");

    let response = app
        .oneshot(get(&format!("/v1/files/{id}/metadata")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let meta = body_json(response).await;
    assert_eq!(meta["id"], id.as_str());
    assert_eq!(meta["byte_size"], 12);
    let fingerprint = meta["fingerprint"].as_str().unwrap();
    assert_eq!(meta["location"], format!("{fingerprint}.txt"));
}

#[tokio::test]
async fn test_duplicate_upload_is_409_with_fingerprint() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = file_store_app(&dir);

    upload_ok(&app, "/v1/files", "a.txt", b"same bytes").await;

    let response = app
        .clone()
        .oneshot(upload_request("/v1/files", "b.txt", b"same bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["details"]["fingerprint"].as_str().unwrap().len(), 64);

    assert_eq!(state.metrics.documents_stored(), 1);
    assert_eq!(state.metrics.duplicate_uploads(), 1);
}

#[tokio::test]
async fn test_distinct_content_gets_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    let a = upload_ok(&app, "/v1/files", "a.txt", b"first").await;
    let b = upload_ok(&app, "/v1/files", "b.txt", b"second").await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_concurrent_identical_uploads_store_once() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let mut set = tokio::task::JoinSet::new();
    for i in 0..8 {
        let app = app.clone();
        set.spawn(async move {
            app.oneshot(upload_request("/v1/files", &format!("copy{i}.txt"), b"race me"))
                .await
                .unwrap()
                .status()
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(status) = set.join_next().await {
        match status.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!((created, conflicts), (1, 7));
}

#[tokio::test]
async fn test_upload_validation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let response = app
        .clone()
        .oneshot(upload_request("/v1/files", "empty.txt", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(upload_request("/v1/files", "slides.pdf", b"%PDF"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

    let response = app
        .clone()
        .oneshot(upload_request("/v1/files", "README", b"no extension"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(upload_request("/v1/files", "bin.txt", &[0xff, 0xfe, 0x00, 0x80]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("not UTF-8 text"));

    // Extension check is case-insensitive.
    let response = app
        .oneshot(upload_request("/v1/files", "LOUD.TXT", b"upper"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_uploads_are_400() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let response = app
        .clone()
        .oneshot(upload_field_request("/v1/files", "attachment", "a.txt", b"x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/files")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        max_upload_bytes: 256,
        ..AppConfig::for_role(Role::FileStore)
    };
    let app = plagio_api::app(file_store_state(&dir, config));

    let response = app
        .oneshot(upload_request("/v1/files", "big.txt", &[b'a'; 4096]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_download_unknown_and_malformed_ids() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/files/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");

    let response = app.oneshot(get("/v1/files/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_blob_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    let id = upload_ok(&app, "/v1/files", "gone.txt", b"soon gone").await;

    for entry in std::fs::read_dir(dir.path()).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let response = app
        .oneshot(get(&format!("/v1/files/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_ascii_file_name_survives_download() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    let id = upload_ok(&app, "/v1/files", "résumé.txt", b"cv").await;

    let response = app
        .oneshot(get(&format!("/v1/files/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename=\"r_sum_.txt\""));
    assert!(disposition.contains("filename*=UTF-8''r%C3%A9sum%C3%A9.txt"));
}

#[tokio::test]
async fn test_metrics_endpoint_reports_domain_counters() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    upload_ok(&app, "/v1/files", "m.txt", b"metrics").await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("plagio_documents_stored_total 1"));
    assert!(body.contains("plagio_http_requests_total"));
    assert!(body.contains("path=\"/v1/files\""));
}

#[tokio::test]
async fn test_metrics_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        metrics_enabled: false,
        ..AppConfig::for_role(Role::FileStore)
    };
    let app = plagio_api::app(file_store_state(&dir, config));
    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_file_service_does_not_serve_other_roles() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = file_store_app(&dir);
    let response = app
        .oneshot(get(&format!("/v1/analyses/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Analysis Service ---------------------------------------------------------

#[tokio::test]
async fn test_analysis_computes_once_then_hits() {
    let file_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{UNKNOWN_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_bytes(b"Hello world\n\nSecond paragraph".to_vec()),
        )
        .expect(1)
        .mount(&file_service)
        .await;

    let (app, state) = analysis_app(file_service.uri().parse().unwrap());
    let uri = format!("/v1/analyses/{UNKNOWN_ID}");

    let first = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-analysis-cache"], "stored");
    let first = body_json(first).await;
    assert_eq!(first["document_id"], UNKNOWN_ID);
    assert_eq!(first["paragraph_count"], 2);
    assert_eq!(first["word_count"], 4);
    assert_eq!(first["character_count"], 29);

    let second = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-analysis-cache"], "hit");
    assert_eq!(body_json(second).await, first);

    assert_eq!(state.metrics.analyses(plagio_analysis::CacheStatus::Stored), 1);
    assert_eq!(state.metrics.analyses(plagio_analysis::CacheStatus::Hit), 1);
}

#[tokio::test]
async fn test_analysis_of_unknown_document_is_404() {
    let file_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{UNKNOWN_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&file_service)
        .await;

    let (app, _) = analysis_app(file_service.uri().parse().unwrap());
    let response = app
        .oneshot(get(&format!("/v1/analyses/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analysis_file_service_failure_is_502() {
    let file_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{UNKNOWN_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk on fire"))
        .mount(&file_service)
        .await;

    let (app, _) = analysis_app(file_service.uri().parse().unwrap());
    let response = app
        .oneshot(get(&format!("/v1/analyses/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert!(!body["error"]["message"].as_str().unwrap().contains("disk on fire"));
}

#[tokio::test]
async fn test_analysis_of_binary_document_is_422() {
    let file_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{UNKNOWN_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00, 0x80]))
        .mount(&file_service)
        .await;

    let (app, _) = analysis_app(file_service.uri().parse().unwrap());
    let response = app
        .oneshot(get(&format!("/v1/analyses/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Gateway (end to end) -----------------------------------------------------

struct Deployment {
    gateway: Router,
    _blobs: tempfile::TempDir,
}

async fn deploy() -> Deployment {
    let blobs = tempfile::tempdir().unwrap();
    let (file_app, _) = file_store_app(&blobs);
    let files_url = spawn(file_app).await;

    let (analysis, _) = analysis_app(files_url.clone());
    let analysis_url = spawn(analysis).await;

    let client = PlagioClient::new(client_config(files_url, analysis_url)).unwrap();
    let gateway = plagio_api::app(AppState::gateway(AppConfig::for_role(Role::Gateway), client));
    Deployment {
        gateway,
        _blobs: blobs,
    }
}

#[tokio::test]
async fn test_gateway_upload_download_analyse() {
    let d = deploy().await;
    let text = "First paragraph here.\n\nSecond one.\n";

    let id = upload_ok(&d.gateway, "/v1/documents", "paper.txt", text.as_bytes()).await;

    let response = d
        .gateway
        .clone()
        .oneshot(get(&format!("/v1/documents/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"paper.txt\""
    );
    assert_eq!(body_bytes(response).await, text.as_bytes());

    let response = d
        .gateway
        .clone()
        .oneshot(post(&format!("/v1/documents/{id}/analysis")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-analysis-cache"], "stored");
    let first = body_json(response).await;
    assert_eq!(first["paragraph_count"], 2);
    assert_eq!(first["word_count"], 5);
    assert_eq!(first["character_count"], text.len());

    let response = d
        .gateway
        .oneshot(get(&format!("/v1/documents/{id}/analysis")))
        .await
        .unwrap();
    assert_eq!(response.headers()["x-analysis-cache"], "hit");
    assert_eq!(body_json(response).await, first);
}

#[tokio::test]
async fn test_gateway_preserves_client_errors() {
    let d = deploy().await;

    upload_ok(&d.gateway, "/v1/documents", "one.txt", b"only once").await;
    let response = d
        .gateway
        .clone()
        .oneshot(upload_request("/v1/documents", "two.txt", b"only once"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("content already stored"));

    let response = d
        .gateway
        .clone()
        .oneshot(upload_request("/v1/documents", "slides.pdf", b"%PDF"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = d
        .gateway
        .clone()
        .oneshot(get(&format!("/v1/documents/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = d
        .gateway
        .oneshot(post(&format!("/v1/documents/{UNKNOWN_ID}/analysis")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gateway_keeps_utf8_file_name() {
    let file_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{UNKNOWN_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"r_sum_.txt\"; filename*=UTF-8''r%C3%A9sum%C3%A9.txt",
                )
                .set_body_bytes(b"cv".to_vec()),
        )
        .mount(&file_service)
        .await;

    let files: url::Url = file_service.uri().parse().unwrap();
    let client = PlagioClient::new(client_config(files.clone(), files)).unwrap();
    let gateway = plagio_api::app(AppState::gateway(AppConfig::for_role(Role::Gateway), client));

    let response = gateway
        .oneshot(get(&format!("/v1/documents/{UNKNOWN_ID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"r_sum_.txt\"; filename*=UTF-8''r%C3%A9sum%C3%A9.txt"
    );
}

#[tokio::test]
async fn test_gateway_rejects_empty_upload_locally() {
    // Upstream is unreachable: a 422 proves the check happened at the gateway.
    let dead: url::Url = "http://127.0.0.1:1".parse().unwrap();
    let client = PlagioClient::new(client_config(dead.clone(), dead)).unwrap();
    let gateway = plagio_api::app(AppState::gateway(AppConfig::for_role(Role::Gateway), client));

    let response = gateway
        .oneshot(upload_request("/v1/documents", "empty.txt", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_gateway_unreachable_upstream_is_502_and_not_ready() {
    let dead: url::Url = "http://127.0.0.1:1".parse().unwrap();
    let client = PlagioClient::new(client_config(dead.clone(), dead)).unwrap();
    let gateway = plagio_api::app(AppState::gateway(AppConfig::for_role(Role::Gateway), client));

    let response = gateway
        .clone()
        .oneshot(upload_request("/v1/documents", "a.txt", b"hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = gateway.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_gateway_ready_when_upstreams_ready() {
    let d = deploy().await;
    let response = d.gateway.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
