//! # Analysis Repository
//!
//! Persisted [`AnalysisRecord`]s keyed by document identifier. Inserts are
//! insert-if-absent: a second insert for the same identifier leaves the first
//! record in place and reports `false`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use plagio_core::DocumentId;

use crate::error::RepositoryError;
use crate::record::AnalysisRecord;

/// Durable analysis records, at most one per document.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// The record for `id`, if one has been written.
    async fn get(&self, id: DocumentId) -> Result<Option<AnalysisRecord>, RepositoryError>;

    /// Write `record` unless one already exists for its document.
    ///
    /// Returns whether this call wrote it.
    async fn insert(&self, record: &AnalysisRecord) -> Result<bool, RepositoryError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// In-memory repository for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnalysisRepository {
    records: Arc<RwLock<HashMap<DocumentId, AnalysisRecord>>>,
}

impl MemoryAnalysisRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AnalysisRepository for MemoryAnalysisRepository {
    async fn get(&self, id: DocumentId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<bool, RepositoryError> {
        let mut guard = self.records.write();
        if guard.contains_key(&record.document_id) {
            return Ok(false);
        }
        guard.insert(record.document_id, record.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::TextCounts;

    #[tokio::test]
    async fn second_insert_keeps_first_record() {
        let repo = MemoryAnalysisRepository::new();
        let id = DocumentId::new();
        let first = AnalysisRecord::new(id, TextCounts::of("a b"));
        let second = AnalysisRecord::new(id, TextCounts::of("different text entirely"));

        assert!(repo.insert(&first).await.unwrap());
        assert!(!repo.insert(&second).await.unwrap());
        assert_eq!(repo.get(id).await.unwrap(), Some(first));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_is_none() {
        let repo = MemoryAnalysisRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.get(DocumentId::new()).await.unwrap(), None);
    }
}
