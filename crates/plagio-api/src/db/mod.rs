//! # Database Persistence Layer
//!
//! Postgres persistence for the file service catalog and the analysis
//! service records, via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, the
//! services use [`PgObjectCatalog`] and [`PgAnalysisRepository`]. When
//! absent, they fall back to the in-memory implementations from
//! `plagio-store` and `plagio-analysis` (development and tests only; nothing
//! survives a restart).
//!
//! The two tables are independent. `analysis_records.document_id` refers to a
//! file service identifier but carries no foreign key: in a split deployment
//! the services may use separate databases.

pub mod analyses;
pub mod stored_objects;

pub use analyses::PgAnalysisRepository;
pub use stored_objects::PgObjectCatalog;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set, running in-memory only mode. \
                 Stored objects and analyses will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
