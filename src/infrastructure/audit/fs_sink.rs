//! Filesystem audit sink.
//!
//! State snapshots overwrite `state.json` as one JSON object; episodes
//! append to `episodes.jsonl`, one JSON object per line, in strict
//! execution order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::models::{AgentState, Episode};
use crate::domain::ports::AuditSink;

const STATE_FILE: &str = "state.json";
const EPISODES_FILE: &str = "episodes.jsonl";

/// Audit sink rooted at a directory handed in by the caller.
pub struct FsAuditSink {
    dir: PathBuf,
}

impl FsAuditSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create audit directory {}", self.dir.display()))
    }
}

#[async_trait]
impl AuditSink for FsAuditSink {
    async fn save_state(&self, state: &AgentState) -> Result<()> {
        self.ensure_dir().await?;
        let json = serde_json::to_string_pretty(state)?;
        tokio::fs::write(self.dir.join(STATE_FILE), json)
            .await
            .context("Failed to write state snapshot")
    }

    async fn append_episode(&self, episode: &Episode) -> Result<()> {
        self.ensure_dir().await?;
        let mut line = serde_json::to_string(episode)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(EPISODES_FILE))
            .await
            .context("Failed to open episode log")?;
        file.write_all(line.as_bytes())
            .await
            .context("Failed to append episode")
    }

    async fn load_recent_episodes(&self, limit: usize) -> Result<Vec<Episode>> {
        let path = self.dir.join(EPISODES_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = tokio::fs::read_to_string(&path)
            .await
            .context("Failed to read episode log")?;

        let episodes: Vec<Episode> = raw
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        let skip = episodes.len().saturating_sub(limit);
        Ok(episodes.into_iter().skip(skip).collect())
    }
}
