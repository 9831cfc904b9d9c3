//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! One state type serves all three roles. Each role fills in the components
//! it needs and leaves the rest `None`:
//!
//! | Role | `store` | `analysis` + `source` | `upstream` |
//! |------|---------|-----------------------|------------|
//! | file-store | yes | | |
//! | analysis | | yes | |
//! | gateway | | | yes |
//!
//! A handler that reaches for an absent component answers 503 (see
//! [`AppState::require_store`] and friends).

use std::sync::Arc;

use plagio_analysis::{AnalysisCache, DocumentSource};
use plagio_client::PlagioClient;
use plagio_store::ContentStore;
use sqlx::PgPool;

use crate::config::{AppConfig, Role};
use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// HTTP-level settings.
    pub config: AppConfig,
    /// Prometheus registry shared with the middleware.
    pub metrics: ApiMetrics,
    /// Content store (file service).
    pub store: Option<ContentStore>,
    /// Analysis cache (analysis service).
    pub analysis: Option<AnalysisCache>,
    /// Where the analysis cache fetches bytes on a miss.
    pub source: Option<Arc<dyn DocumentSource>>,
    /// Clients for the two backing services (gateway).
    pub upstream: Option<PlagioClient>,
    /// Postgres pool, when `DATABASE_URL` is set. Used by readiness.
    pub db_pool: Option<PgPool>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.is_some())
            .field("analysis", &self.analysis.is_some())
            .field("upstream", &self.upstream.is_some())
            .field("db_pool", &self.db_pool.is_some())
            .finish()
    }
}

impl AppState {
    fn empty(config: AppConfig) -> Self {
        Self {
            config,
            metrics: ApiMetrics::new(),
            store: None,
            analysis: None,
            source: None,
            upstream: None,
            db_pool: None,
        }
    }

    /// State for the file service.
    pub fn file_store(config: AppConfig, store: ContentStore) -> Self {
        Self {
            store: Some(store),
            ..Self::empty(AppConfig { role: Role::FileStore, ..config })
        }
    }

    /// State for the analysis service.
    pub fn analysis(
        config: AppConfig,
        cache: AnalysisCache,
        source: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            analysis: Some(cache),
            source: Some(source),
            ..Self::empty(AppConfig { role: Role::Analysis, ..config })
        }
    }

    /// State for the gateway.
    pub fn gateway(config: AppConfig, upstream: PlagioClient) -> Self {
        Self {
            upstream: Some(upstream),
            ..Self::empty(AppConfig { role: Role::Gateway, ..config })
        }
    }

    /// Attach the database pool used by the readiness check.
    pub fn with_db_pool(mut self, pool: Option<PgPool>) -> Self {
        self.db_pool = pool;
        self
    }

    /// The content store, or 503 if this process does not run one.
    pub fn require_store(&self) -> Result<&ContentStore, AppError> {
        self.store
            .as_ref()
            .ok_or_else(|| AppError::service_unavailable("content store not configured"))
    }

    /// The analysis cache and its document source, or 503.
    pub fn require_analysis(&self) -> Result<(&AnalysisCache, &dyn DocumentSource), AppError> {
        match (&self.analysis, &self.source) {
            (Some(cache), Some(source)) => Ok((cache, source.as_ref())),
            _ => Err(AppError::service_unavailable("analysis cache not configured")),
        }
    }

    /// The upstream service clients, or 503.
    pub fn require_upstream(&self) -> Result<&PlagioClient, AppError> {
        self.upstream
            .as_ref()
            .ok_or_else(|| AppError::service_unavailable("upstream services not configured"))
    }
}
