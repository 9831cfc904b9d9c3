//! # Analysis Cache
//!
//! [`AnalysisCache::get_or_compute`] is an explicit two-branch lookup:
//!
//! 1. A persisted record exists: return it ([`CacheStatus::Hit`]). No fetch,
//!    no write.
//! 2. Miss: fetch bytes from the [`DocumentSource`], decode, count, persist
//!    with insert-if-absent, and return.
//!
//! A failed write after a successful compute still answers the caller, with
//! [`CacheStatus::NotStored`]. A failed *read* of the repository is an error:
//! without it the cache cannot tell a hit from a miss.

use std::sync::Arc;

use plagio_core::DocumentId;
use serde::{Deserialize, Serialize};

use crate::counting::{decode_text, TextCounts};
use crate::error::AnalysisError;
use crate::record::AnalysisRecord;
use crate::repository::AnalysisRepository;
use crate::source::DocumentSource;

/// How a returned record relates to the persisted cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheStatus {
    /// Served from a previously persisted record.
    Hit,
    /// Computed now and persisted (by this call or a concurrent one).
    Stored,
    /// Computed now; persisting failed. Not guaranteed cached.
    NotStored,
}

impl CacheStatus {
    /// Header and metric label value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stored => "stored",
            Self::NotStored => "not-stored",
        }
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// The analysis.
    pub record: AnalysisRecord,
    /// Cache disposition.
    pub status: CacheStatus,
}

/// Lazy, persisted analysis of stored documents.
#[derive(Clone)]
pub struct AnalysisCache {
    repository: Arc<dyn AnalysisRepository>,
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache").finish_non_exhaustive()
    }
}

impl AnalysisCache {
    /// Cache backed by `repository`.
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }

    /// The analysis of `document_id`, computing it from `source` on a miss.
    pub async fn get_or_compute(
        &self,
        document_id: DocumentId,
        source: &dyn DocumentSource,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if let Some(record) = self.repository.get(document_id).await? {
            tracing::debug!(document_id = %document_id, "analysis cache hit");
            return Ok(AnalysisOutcome {
                record,
                status: CacheStatus::Hit,
            });
        }

        tracing::debug!(document_id = %document_id, "analysis cache miss");
        let bytes = source.fetch(document_id).await.map_err(|e| {
            tracing::warn!(document_id = %document_id, error = %e, "document fetch failed");
            AnalysisError::from(e)
        })?;

        let text = decode_text(&bytes).map_err(|e| AnalysisError::InvalidInput {
            document_id,
            reason: e.to_string(),
        })?;
        let computed = AnalysisRecord::new(document_id, TextCounts::of(text));

        match self.repository.insert(&computed).await {
            Ok(true) => {
                tracing::info!(
                    document_id = %document_id,
                    paragraphs = computed.paragraph_count,
                    words = computed.word_count,
                    characters = computed.character_count,
                    "analysis computed and stored"
                );
                Ok(AnalysisOutcome {
                    record: computed,
                    status: CacheStatus::Stored,
                })
            }
            Ok(false) => {
                // A concurrent miss persisted first. Hand back its record so
                // every caller sees the same one.
                tracing::debug!(document_id = %document_id, "analysis already stored by concurrent request");
                let record = match self.repository.get(document_id).await {
                    Ok(Some(stored)) => stored,
                    _ => computed,
                };
                Ok(AnalysisOutcome {
                    record,
                    status: CacheStatus::Stored,
                })
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %document_id,
                    error = %e,
                    "analysis computed but not stored"
                );
                Ok(AnalysisOutcome {
                    record: computed,
                    status: CacheStatus::NotStored,
                })
            }
        }
    }

    /// Check the repository is reachable.
    pub async fn ping(&self) -> Result<(), AnalysisError> {
        Ok(self.repository.ping().await?)
    }
}
