//! Agent memory: bounded short-term log over the durable long-term store.
//!
//! Implements the [`MemoryStore`] port with an in-memory, order-preserving
//! short-term buffer (optionally snapshotted to disk) and the SQLite
//! long-term store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::JsonMap;
use crate::domain::ports::{MemoryRecord, MemoryStore, StmEntry};
use crate::infrastructure::sqlite::SqliteMemoryStore;

/// Default short-term memory capacity.
pub const DEFAULT_STM_CAPACITY: usize = 20;

/// Production [`MemoryStore`] implementation.
pub struct AgentMemory {
    stm: RwLock<Vec<StmEntry>>,
    stm_capacity: usize,
    snapshot_path: Option<PathBuf>,
    ltm: SqliteMemoryStore,
}

impl AgentMemory {
    pub fn new(ltm: SqliteMemoryStore) -> Self {
        Self {
            stm: RwLock::new(Vec::new()),
            stm_capacity: DEFAULT_STM_CAPACITY,
            snapshot_path: None,
            ltm,
        }
    }

    /// Persist the short-term buffer to `path` after every append. A
    /// pre-existing snapshot is loaded eagerly; corrupt snapshots are
    /// ignored.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Ok(raw) = std::fs::read_to_string(&path) {
            if let Ok(entries) = serde_json::from_str::<Vec<StmEntry>>(&raw) {
                self.stm = RwLock::new(entries);
            }
        }
        self.snapshot_path = Some(path);
        self
    }

    pub fn with_stm_capacity(mut self, capacity: usize) -> Self {
        self.stm_capacity = capacity.max(1);
        self
    }

    /// Ordered copy of the short-term buffer.
    pub async fn stm_snapshot(&self) -> Vec<StmEntry> {
        self.stm.read().await.clone()
    }

    /// The most recently written long-term records.
    pub async fn recent_long_term(&self, limit: usize) -> Result<Vec<MemoryRecord>> {
        self.ltm.recent(limit).await
    }

    async fn persist_snapshot(&self, entries: &[StmEntry]) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create short-term memory directory")?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(path, json)
            .await
            .context("Failed to write short-term memory snapshot")
    }
}

#[async_trait]
impl MemoryStore for AgentMemory {
    async fn add_to_stm(&self, kind: &str, content: &str, meta: Option<JsonMap>) -> Result<()> {
        let snapshot = {
            let mut stm = self.stm.write().await;
            stm.push(StmEntry {
                kind: kind.to_string(),
                content: content.to_string(),
                meta: meta.unwrap_or_default(),
            });
            let len = stm.len();
            if len > self.stm_capacity {
                stm.drain(..len - self.stm_capacity);
            }
            stm.clone()
        };
        self.persist_snapshot(&snapshot).await
    }

    async fn remember_long_term(
        &self,
        record_id: &str,
        text: &str,
        tags: &[&str],
        metadata: JsonMap,
    ) -> Result<()> {
        self.ltm.upsert(record_id, text, tags, &metadata).await
    }

    async fn recall_long_term(&self, query: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
        self.ltm.search(query, limit).await
    }
}
