//! Stored object catalog persistence.
//!
//! Fingerprint uniqueness is enforced by the `stored_objects_fingerprint_key`
//! constraint, so two racing inserts of the same content are serialized by
//! Postgres: one commits, the other gets a unique violation that surfaces as
//! [`CatalogError::DuplicateFingerprint`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plagio_core::{DocumentId, Fingerprint};
use plagio_store::{CatalogError, Location, ObjectCatalog, StoredObject};
use sqlx::PgPool;
use uuid::Uuid;

const FINGERPRINT_CONSTRAINT: &str = "stored_objects_fingerprint_key";

/// Insert a stored object record. Fails on a duplicate fingerprint or id.
pub async fn insert_stored_object(pool: &PgPool, object: &StoredObject) -> Result<(), sqlx::Error> {
    let byte_size = i64::try_from(object.byte_size).map_err(|_| {
        sqlx::Error::Protocol(format!("byte_size {} does not fit BIGINT", object.byte_size))
    })?;

    sqlx::query(
        "INSERT INTO stored_objects (id, fingerprint, display_name, location, media_type, byte_size, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(*object.id.as_uuid())
    .bind(object.fingerprint.as_str())
    .bind(&object.display_name)
    .bind(object.location.as_str())
    .bind(&object.media_type)
    .bind(byte_size)
    .bind(object.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a stored object by identifier.
pub async fn load_by_id(pool: &PgPool, id: DocumentId) -> Result<Option<StoredObject>, sqlx::Error> {
    let row = sqlx::query_as::<_, StoredObjectRow>(
        "SELECT id, fingerprint, display_name, location, media_type, byte_size, created_at
         FROM stored_objects WHERE id = $1",
    )
    .bind(*id.as_uuid())
    .fetch_optional(pool)
    .await?;

    row.map(StoredObjectRow::into_object).transpose()
}

/// Load a stored object by fingerprint.
pub async fn load_by_fingerprint(
    pool: &PgPool,
    fingerprint: &Fingerprint,
) -> Result<Option<StoredObject>, sqlx::Error> {
    let row = sqlx::query_as::<_, StoredObjectRow>(
        "SELECT id, fingerprint, display_name, location, media_type, byte_size, created_at
         FROM stored_objects WHERE fingerprint = $1",
    )
    .bind(fingerprint.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(StoredObjectRow::into_object).transpose()
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct StoredObjectRow {
    id: Uuid,
    fingerprint: String,
    display_name: String,
    location: String,
    media_type: String,
    byte_size: i64,
    created_at: DateTime<Utc>,
}

impl StoredObjectRow {
    fn into_object(self) -> Result<StoredObject, sqlx::Error> {
        let fingerprint = Fingerprint::from_hex(&self.fingerprint).map_err(|e| {
            sqlx::Error::Protocol(format!("corrupt fingerprint in stored object {}: {e}", self.id))
        })?;
        let location = Location::parse(&self.location).map_err(|e| {
            sqlx::Error::Protocol(format!("corrupt location in stored object {}: {e}", self.id))
        })?;
        let byte_size = u64::try_from(self.byte_size).map_err(|_| {
            sqlx::Error::Protocol(format!(
                "negative byte_size {} in stored object {}",
                self.byte_size, self.id
            ))
        })?;

        Ok(StoredObject {
            id: DocumentId::from_uuid(self.id),
            fingerprint,
            display_name: self.display_name,
            location,
            media_type: self.media_type,
            byte_size,
            created_at: self.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog adapter
// ---------------------------------------------------------------------------

/// [`ObjectCatalog`] backed by the `stored_objects` table.
#[derive(Debug, Clone)]
pub struct PgObjectCatalog {
    pool: PgPool,
}

impl PgObjectCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> CatalogError {
    CatalogError::Unavailable(err.to_string())
}

fn is_fingerprint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(FINGERPRINT_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl ObjectCatalog for PgObjectCatalog {
    async fn insert(&self, object: &StoredObject) -> Result<(), CatalogError> {
        insert_stored_object(&self.pool, object).await.map_err(|e| {
            if is_fingerprint_violation(&e) {
                CatalogError::DuplicateFingerprint(object.fingerprint.clone())
            } else {
                unavailable(e)
            }
        })
    }

    async fn get_by_id(&self, id: DocumentId) -> Result<Option<StoredObject>, CatalogError> {
        load_by_id(&self.pool, id).await.map_err(unavailable)
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<StoredObject>, CatalogError> {
        load_by_fingerprint(&self.pool, fingerprint)
            .await
            .map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
