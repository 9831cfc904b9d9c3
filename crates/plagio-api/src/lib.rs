//! # plagio-api: Axum Services for Plagio
//!
//! One binary, three roles. [`app`] mounts the routes for the role in
//! [`AppState::config`](state::AppState):
//!
//! | Role | Prefix | Module | Backed by |
//! |------|--------|--------|-----------|
//! | `file-store` | `/v1/files/*` | [`routes::files`] | `ContentStore` |
//! | `analysis` | `/v1/analyses/*` | [`routes::analyses`] | `AnalysisCache` |
//! | `gateway` | `/v1/documents/*` | [`routes::gateway`] | `plagio-client` |
//!
//! Every role also serves `/health/liveness`, `/health/readiness`,
//! `/metrics` (unless disabled) and `/openapi.json`.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → DefaultBodyLimit → Handler
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod source;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::config::Role;
use crate::state::AppState;

/// Assemble the application router for the configured role.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;

    let role_routes = match state.config.role {
        Role::FileStore => routes::files::router(),
        Role::Analysis => routes::analyses::router(),
        Role::Gateway => routes::gateway::router(),
    };
    tracing::info!(role = %state.config.role, "mounting routes");

    let mut api = Router::new()
        .merge(role_routes)
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(state.metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        health = health.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    let health = health.with_state(state);

    Router::new().merge(health).merge(api)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness check: Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: Verifies the role's backing components.
///
/// - Database connection is healthy (when configured).
/// - file-store: catalog reachable and blob root writable.
/// - analysis: analysis repository reachable.
/// - gateway: both upstream services report ready.
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    let check = match state.config.role {
        Role::FileStore => match &state.store {
            Some(store) => store.ping().await.map_err(|e| format!("content store: {e}")),
            None => Err("content store not configured".to_string()),
        },
        Role::Analysis => match &state.analysis {
            Some(cache) => cache.ping().await.map_err(|e| format!("analysis cache: {e}")),
            None => Err("analysis cache not configured".to_string()),
        },
        Role::Gateway => match &state.upstream {
            Some(client) => {
                let files = client.files().ready().await;
                let analyses = client.analyses().ready().await;
                match (files, analyses) {
                    (Ok(()), Ok(())) => Ok(()),
                    (Err(e), _) => Err(format!("file service unreachable: {e}")),
                    (_, Err(e)) => Err(format!("analysis service unreachable: {e}")),
                }
            }
            None => Err("upstream services not configured".to_string()),
        },
    };

    match check {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(msg) => {
            tracing::warn!("{}", msg);
            (StatusCode::SERVICE_UNAVAILABLE, msg).into_response()
        }
    }
}
