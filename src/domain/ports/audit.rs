use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{AgentState, Episode};

/// Durable audit trail the orchestrator writes through.
///
/// The sink is handed to the orchestrator's constructor rather than read
/// from ambient process state, so two orchestrators can audit to different
/// locations in the same process.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Overwrite the current state snapshot (one JSON object).
    async fn save_state(&self, state: &AgentState) -> Result<()>;

    /// Append one episode (one JSON object per line, append-only).
    async fn append_episode(&self, episode: &Episode) -> Result<()>;

    /// The most recent `limit` episodes, oldest first. Lines that fail to
    /// parse are skipped.
    async fn load_recent_episodes(&self, limit: usize) -> Result<Vec<Episode>>;
}
