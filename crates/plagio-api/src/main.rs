//! # plagio-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the role named by `PLAGIO_ROLE`.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use plagio_analysis::{AnalysisCache, AnalysisRepository, MemoryAnalysisRepository};
use plagio_api::config::{Role, ServiceConfig};
use plagio_api::db::{self, PgAnalysisRepository, PgObjectCatalog};
use plagio_api::source::HttpDocumentSource;
use plagio_api::state::AppState;
use plagio_client::{ClientConfig, PlagioClient};
use plagio_store::{ContentStore, MemoryCatalog, ObjectCatalog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServiceConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    let port = config.app.port;

    // Initialize database pool (optional; absent means in-memory only).
    let db_pool = db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let state = match config.app.role {
        Role::FileStore => {
            let catalog: Arc<dyn ObjectCatalog> = match &db_pool {
                Some(pool) => Arc::new(PgObjectCatalog::new(pool.clone())),
                None => Arc::new(MemoryCatalog::new()),
            };
            let store = ContentStore::new(config.store, catalog);
            if let Err(e) = store.ping().await {
                tracing::warn!("Content store not ready at startup: {e}");
            }
            tracing::info!(
                storage_root = %store.config().storage_root.display(),
                fingerprint = %store.config().fingerprint_algorithm,
                allowed_extensions = %store.config().extension_allow_list,
                "content store configured"
            );
            AppState::file_store(config.app, store)
        }
        Role::Analysis => {
            let repository: Arc<dyn AnalysisRepository> = match &db_pool {
                Some(pool) => Arc::new(PgAnalysisRepository::new(pool.clone())),
                None => Arc::new(MemoryAnalysisRepository::new()),
            };
            let client = upstream_client()?;
            let source = HttpDocumentSource::new(client.files().clone());
            AppState::analysis(config.app, AnalysisCache::new(repository), Arc::new(source))
        }
        Role::Gateway => AppState::gateway(config.app, upstream_client()?),
    }
    .with_db_pool(db_pool);

    let role = state.config.role;
    let app = plagio_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%role, "Plagio API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing; `PLAGIO_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("PLAGIO_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn upstream_client() -> Result<PlagioClient, Box<dyn std::error::Error>> {
    let client_config = ClientConfig::from_env().map_err(|e| {
        tracing::error!("Invalid upstream configuration: {e}");
        e
    })?;
    tracing::info!(
        file_service = %client_config.file_service_url,
        analysis_service = %client_config.analysis_service_url,
        "upstream services configured"
    );
    Ok(PlagioClient::new(client_config)?)
}
