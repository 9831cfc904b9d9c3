//! # Content Store
//!
//! [`ContentStore`] ties the catalog and the blob medium together:
//!
//! - [`store`](ContentStore::store) validates, fingerprints, rejects
//!   duplicates, writes bytes, then records metadata.
//! - [`fetch`](ContentStore::fetch) resolves an identifier and re-verifies
//!   the bytes against the recorded fingerprint before returning them.
//! - [`describe`](ContentStore::describe) returns metadata only.
//!
//! Every backend call is bounded by
//! [`ContentStoreConfig::io_timeout`]; a timeout surfaces as
//! [`StoreError::StorageUnavailable`].

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use plagio_core::{
    DocumentId, FileExtension, Fingerprint, ValidationError, DEFAULT_MEDIA_TYPE,
};

use crate::blob::{BlobStore, FsBlobStore};
use crate::catalog::ObjectCatalog;
use crate::config::ContentStoreConfig;
use crate::error::StoreError;
use crate::object::{FetchedObject, Location, StoredObject};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Deduplicating document store.
#[derive(Clone)]
pub struct ContentStore {
    config: ContentStoreConfig,
    catalog: Arc<dyn ObjectCatalog>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContentStore {
    /// Content store writing blobs under `config.storage_root`.
    pub fn new(config: ContentStoreConfig, catalog: Arc<dyn ObjectCatalog>) -> Self {
        let blobs = Arc::new(FsBlobStore::new(config.storage_root.clone()));
        Self::with_blob_store(config, catalog, blobs)
    }

    /// Content store over an explicit blob medium.
    pub fn with_blob_store(
        config: ContentStoreConfig,
        catalog: Arc<dyn ObjectCatalog>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            blobs,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ContentStoreConfig {
        &self.config
    }

    /// Store `bytes` under a fresh identifier.
    ///
    /// Fails with [`StoreError::DuplicateContent`] if identical bytes are
    /// already stored, whether detected up front or by the catalog's
    /// uniqueness constraint after a lost race.
    pub async fn store(
        &self,
        bytes: &[u8],
        display_name: &str,
        media_type: Option<&str>,
    ) -> Result<StoredObject, StoreError> {
        if bytes.is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        let extension = FileExtension::from_file_name(display_name)?;
        self.config.extension_allow_list.check(&extension)?;
        ensure_text(bytes)?;

        let fingerprint = Fingerprint::compute(self.config.fingerprint_algorithm, bytes);

        let existing = self
            .bounded("find_by_fingerprint", self.catalog.find_by_fingerprint(&fingerprint))
            .await?;
        if let Some(existing) = existing {
            tracing::info!(
                fingerprint = %fingerprint,
                existing_id = %existing.id,
                "rejected duplicate upload"
            );
            return Err(StoreError::DuplicateContent { fingerprint });
        }

        let location = Location::derive(&fingerprint, &extension);
        self.bounded("put_blob", self.blobs.put(&location, bytes))
            .await?;

        let object = StoredObject {
            id: DocumentId::new(),
            fingerprint,
            display_name: display_name.to_string(),
            location,
            media_type: media_type
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MEDIA_TYPE)
                .to_string(),
            byte_size: bytes.len() as u64,
            created_at: Utc::now(),
        };

        match self.bounded("insert", self.catalog.insert(&object)).await {
            Ok(()) => {
                tracing::info!(
                    id = %object.id,
                    fingerprint = %object.fingerprint,
                    bytes = object.byte_size,
                    "stored document"
                );
                Ok(object)
            }
            Err(StoreError::DuplicateContent { fingerprint }) => {
                // Lost the race to a concurrent identical upload. The blob
                // we wrote is byte-identical to the winner's.
                tracing::info!(fingerprint = %fingerprint, "rejected duplicate upload after race");
                Err(StoreError::DuplicateContent { fingerprint })
            }
            Err(e) => {
                tracing::error!(
                    fingerprint = %object.fingerprint,
                    location = %object.location,
                    error = %e,
                    "metadata insert failed; blob left unreferenced"
                );
                Err(e)
            }
        }
    }

    /// Retrieve the exact bytes stored under `id`.
    ///
    /// Missing bytes or bytes that no longer match the recorded fingerprint
    /// are reported as [`StoreError::NotFound`]; the two cases are logged
    /// separately.
    pub async fn fetch(&self, id: DocumentId) -> Result<FetchedObject, StoreError> {
        let object = self.describe(id).await?;

        let bytes = match self
            .bounded("get_blob", self.blobs.get(&object.location))
            .await?
        {
            Some(bytes) => bytes,
            None => {
                tracing::warn!(
                    id = %id,
                    location = %object.location,
                    "catalog record has no blob"
                );
                return Err(StoreError::NotFound(id));
            }
        };

        if !object.fingerprint.matches(&bytes) {
            tracing::error!(
                id = %id,
                location = %object.location,
                fingerprint = %object.fingerprint,
                "blob integrity check failed"
            );
            return Err(StoreError::NotFound(id));
        }

        Ok(FetchedObject {
            bytes,
            display_name: object.display_name,
            media_type: object.media_type,
        })
    }

    /// Metadata for `id` without reading the bytes.
    pub async fn describe(&self, id: DocumentId) -> Result<StoredObject, StoreError> {
        self.bounded("get_by_id", self.catalog.get_by_id(id))
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Check both backends are reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping_catalog", self.catalog.ping()).await?;
        self.bounded("ping_blobs", self.blobs.ping()).await
    }

    async fn bounded<T, E, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<StoreError>,
    {
        match tokio::time::timeout(self.config.io_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.config.io_timeout.as_millis() as u64,
                    "storage operation timed out"
                );
                Err(StoreError::StorageUnavailable(format!(
                    "{op} timed out after {:?}",
                    self.config.io_timeout
                )))
            }
        }
    }
}

/// Accept UTF-8 text, optionally prefixed by a byte-order mark.
fn ensure_text(bytes: &[u8]) -> Result<(), ValidationError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(body)
        .map(|_| ())
        .map_err(|e| ValidationError::NotText {
            offset: e.valid_up_to() + (bytes.len() - body.len()),
        })
}
