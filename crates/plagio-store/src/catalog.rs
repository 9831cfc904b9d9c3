//! # Object Catalog
//!
//! The metadata side of the content store. Implementations must enforce
//! fingerprint uniqueness atomically: of two concurrent inserts with the same
//! fingerprint, exactly one succeeds and the other reports
//! [`CatalogError::DuplicateFingerprint`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use plagio_core::{DocumentId, Fingerprint};

use crate::error::CatalogError;
use crate::object::StoredObject;

/// Durable metadata records keyed by identifier, unique by fingerprint.
#[async_trait]
pub trait ObjectCatalog: Send + Sync {
    /// Record a new object. Fails if its fingerprint is already recorded.
    async fn insert(&self, object: &StoredObject) -> Result<(), CatalogError>;

    /// Look up an object by identifier.
    async fn get_by_id(&self, id: DocumentId) -> Result<Option<StoredObject>, CatalogError>;

    /// Look up an object by fingerprint.
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<StoredObject>, CatalogError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CatalogInner {
    by_id: HashMap<DocumentId, StoredObject>,
    by_fingerprint: HashMap<Fingerprint, DocumentId>,
}

/// In-memory catalog for development and tests.
///
/// Uses `parking_lot::RwLock`; the lock is never held across an `.await`.
/// Uniqueness check and insert run under one write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<CatalogInner>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded objects.
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// Whether no objects are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectCatalog for MemoryCatalog {
    async fn insert(&self, object: &StoredObject) -> Result<(), CatalogError> {
        let mut guard = self.inner.write();
        if guard.by_fingerprint.contains_key(&object.fingerprint) {
            return Err(CatalogError::DuplicateFingerprint(object.fingerprint.clone()));
        }
        if guard.by_id.contains_key(&object.id) {
            return Err(CatalogError::Unavailable(format!(
                "identifier {} already recorded",
                object.id
            )));
        }
        guard
            .by_fingerprint
            .insert(object.fingerprint.clone(), object.id);
        guard.by_id.insert(object.id, object.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: DocumentId) -> Result<Option<StoredObject>, CatalogError> {
        Ok(self.inner.read().by_id.get(&id).cloned())
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<StoredObject>, CatalogError> {
        let guard = self.inner.read();
        Ok(guard
            .by_fingerprint
            .get(fingerprint)
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }
}
