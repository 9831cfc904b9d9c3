//! # plagio-analysis: Lazy Analysis Cache
//!
//! Computes paragraph, word and character counts for a stored document the
//! first time they are asked for, persists the result, and answers every
//! later request from the persisted record.
//!
//! The cache never talks to the content store directly. Raw bytes come
//! through a [`DocumentSource`], which in production is the HTTP client for
//! the file service and in tests is whatever the test needs it to be.
//!
//! Results are written with insert-if-absent semantics, so two concurrent
//! misses for the same document both compute, one write wins, and both
//! callers get the same record back.

pub mod cache;
pub mod counting;
pub mod error;
pub mod record;
pub mod repository;
pub mod source;

pub use cache::{AnalysisCache, AnalysisOutcome, CacheStatus};
pub use counting::{character_count, decode_text, paragraph_count, word_count, TextCounts};
pub use error::{AnalysisError, RepositoryError, SourceError};
pub use record::AnalysisRecord;
pub use repository::{AnalysisRepository, MemoryAnalysisRepository};
pub use source::DocumentSource;
