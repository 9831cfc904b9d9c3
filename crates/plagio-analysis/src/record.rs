//! Persisted analysis results.

use chrono::{DateTime, Utc};
use plagio_core::DocumentId;
use serde::{Deserialize, Serialize};

use crate::counting::TextCounts;

/// Analysis of one stored document. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// The analysed document. At most one record exists per identifier.
    pub document_id: DocumentId,
    /// Non-empty line-break-delimited segments.
    pub paragraph_count: u64,
    /// Whitespace-delimited tokens.
    pub word_count: u64,
    /// UTF-16 code units.
    pub character_count: u64,
    /// When the counts were computed.
    pub computed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Record `counts` for `document_id`, stamped now.
    pub fn new(document_id: DocumentId, counts: TextCounts) -> Self {
        Self {
            document_id,
            paragraph_count: counts.paragraph_count,
            word_count: counts.word_count,
            character_count: counts.character_count,
            computed_at: Utc::now(),
        }
    }

    /// The counts without identity or timestamp.
    pub fn counts(&self) -> TextCounts {
        TextCounts {
            paragraph_count: self.paragraph_count,
            word_count: self.word_count,
            character_count: self.character_count,
        }
    }
}
