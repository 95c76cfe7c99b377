//! SQLite-backed long-term memory store.
//!
//! One table, upsert-by-id, substring recall ordered newest first. The core
//! treats this as an opaque key-value text store; nothing else about the
//! schema is contractual.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::models::JsonMap;
use crate::domain::ports::MemoryRecord;

#[derive(Clone)]
pub struct SqliteMemoryStore {
    pool: SqlitePool,
}

impl SqliteMemoryStore {
    /// Create the store, initializing the schema if needed.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS ltm_records (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL,
                tags TEXT NOT NULL,
                metadata TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .context("Failed to initialize ltm_records schema")?;

        Ok(Self { pool })
    }

    /// Insert or replace the record with this id.
    pub async fn upsert(&self, id: &str, text: &str, tags: &[&str], metadata: &JsonMap) -> Result<()> {
        let tags_json = serde_json::to_string(tags)?;
        let metadata_json = serde_json::to_string(metadata)?;

        sqlx::query(
            r"INSERT INTO ltm_records (id, text, created_at, tags, metadata)
              VALUES (?, ?, ?, ?, ?)
              ON CONFLICT(id) DO UPDATE SET
                  text = excluded.text,
                  created_at = excluded.created_at,
                  tags = excluded.tags,
                  metadata = excluded.metadata",
        )
        .bind(id)
        .bind(text)
        .bind(Utc::now().to_rfc3339())
        .bind(tags_json)
        .bind(metadata_json)
        .execute(&self.pool)
        .await
        .context("Failed to upsert memory record")?;

        Ok(())
    }

    /// Records whose text contains `query`, newest first.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r"SELECT id, text, tags, metadata
              FROM ltm_records
              WHERE text LIKE ?
              ORDER BY created_at DESC
              LIMIT ?",
        )
        .bind(format!("%{query}%"))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .context("Failed to search memory records")?;

        rows.into_iter().map(|row| row_to_record(&row)).collect()
    }

    /// The most recently written records.
    pub async fn recent(&self, limit: usize) -> Result<Vec<MemoryRecord>> {
        let rows = sqlx::query(
            r"SELECT id, text, tags, metadata
              FROM ltm_records
              ORDER BY created_at DESC
              LIMIT ?",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .context("Failed to load recent memory records")?;

        rows.into_iter().map(|row| row_to_record(&row)).collect()
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<MemoryRecord> {
    let tags: Vec<String> = serde_json::from_str(row.get::<String, _>("tags").as_str())?;
    let metadata: JsonMap = serde_json::from_str(row.get::<String, _>("metadata").as_str())?;
    Ok(MemoryRecord {
        id: row.get("id"),
        text: row.get("text"),
        tags,
        metadata,
    })
}
