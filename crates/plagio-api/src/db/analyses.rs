//! Analysis record persistence.
//!
//! Records are write-once. Inserts use `ON CONFLICT (document_id) DO NOTHING`
//! and report whether this call wrote the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plagio_analysis::{AnalysisRecord, AnalysisRepository, RepositoryError};
use plagio_core::DocumentId;
use sqlx::PgPool;
use uuid::Uuid;

fn to_bigint(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value)
        .map_err(|_| sqlx::Error::Protocol(format!("{column} {value} does not fit BIGINT")))
}

/// Insert an analysis record unless one exists for the document.
///
/// Returns `true` when this call inserted the row.
pub async fn insert_if_absent(pool: &PgPool, record: &AnalysisRecord) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO analysis_records (document_id, paragraph_count, word_count, character_count, computed_at)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (document_id) DO NOTHING",
    )
    .bind(*record.document_id.as_uuid())
    .bind(to_bigint(record.paragraph_count, "paragraph_count")?)
    .bind(to_bigint(record.word_count, "word_count")?)
    .bind(to_bigint(record.character_count, "character_count")?)
    .bind(record.computed_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Load the analysis record for a document.
pub async fn load_record(
    pool: &PgPool,
    document_id: DocumentId,
) -> Result<Option<AnalysisRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        "SELECT document_id, paragraph_count, word_count, character_count, computed_at
         FROM analysis_records WHERE document_id = $1",
    )
    .bind(*document_id.as_uuid())
    .fetch_optional(pool)
    .await?;

    row.map(AnalysisRow::into_record).transpose()
}

#[derive(sqlx::FromRow)]
struct AnalysisRow {
    document_id: Uuid,
    paragraph_count: i64,
    word_count: i64,
    character_count: i64,
    computed_at: DateTime<Utc>,
}

impl AnalysisRow {
    fn into_record(self) -> Result<AnalysisRecord, sqlx::Error> {
        let id = self.document_id;
        let count = |value: i64, column: &str| {
            u64::try_from(value).map_err(|_| {
                sqlx::Error::Protocol(format!("negative {column} {value} in analysis record {id}"))
            })
        };

        Ok(AnalysisRecord {
            document_id: DocumentId::from_uuid(id),
            paragraph_count: count(self.paragraph_count, "paragraph_count")?,
            word_count: count(self.word_count, "word_count")?,
            character_count: count(self.character_count, "character_count")?,
            computed_at: self.computed_at,
        })
    }
}

/// [`AnalysisRepository`] backed by the `analysis_records` table.
#[derive(Debug, Clone)]
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn get(&self, id: DocumentId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        load_record(&self.pool, id).await.map_err(unavailable)
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<bool, RepositoryError> {
        insert_if_absent(&self.pool, record).await.map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
