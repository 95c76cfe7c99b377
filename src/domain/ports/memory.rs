use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::JsonMap;

/// One durable long-term memory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Upsert key
    pub id: String,
    /// Free-text content; also the search target
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: JsonMap,
}

/// One bounded short-term memory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmEntry {
    /// Record kind (task, plan, reflection, result, error, ...)
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub meta: JsonMap,
}

/// Memory system contract the orchestrator depends on.
///
/// The core treats this purely as a key-value/append log: a bounded,
/// order-preserving short-term log plus a durable long-term store keyed by
/// record id.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append a short-term record, evicting the oldest past capacity.
    async fn add_to_stm(&self, kind: &str, content: &str, meta: Option<JsonMap>) -> Result<()>;

    /// Upsert a durable record keyed by `record_id`.
    async fn remember_long_term(
        &self,
        record_id: &str,
        text: &str,
        tags: &[&str],
        metadata: JsonMap,
    ) -> Result<()>;

    /// Up to `limit` records whose text matches `query`, newest first.
    async fn recall_long_term(&self, query: &str, limit: usize) -> Result<Vec<MemoryRecord>>;
}
