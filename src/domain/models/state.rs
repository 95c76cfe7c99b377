//! Agent state and episode audit records.
//!
//! Both shapes are serialized verbatim into the audit trail; their field
//! names are a cross-implementation compatibility contract and must not
//! change.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lifecycle status of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Process-wide orchestrator state, overwritten on every transition and
/// flushed to the audit sink after every task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub status: AgentStatus,
    pub current_task: Option<String>,
    pub completed_tasks: u64,
}

impl AgentState {
    pub fn new() -> Self {
        Self {
            status: AgentStatus::Idle,
            current_task: None,
            completed_tasks: 0,
        }
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new()
    }
}

/// One append-only audit record of a task execution attempt.
///
/// Never mutated after creation. A failed attempt carries the failure reason
/// in `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub task_id: String,
    pub input: String,
    pub output: String,
    pub success: bool,
    pub timestamp: String,
}

impl Episode {
    /// A successful execution record, stamped now.
    pub fn success(task_id: impl Into<String>, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            input: input.into(),
            output: output.into(),
            success: true,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// A failed execution record carrying the failure reason as output.
    pub fn failure(task_id: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            input: input.into(),
            output: reason.into(),
            success: false,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_field_names_are_stable() {
        let state = AgentState::new();
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["status"], "idle");
        assert!(value.get("current_task").is_some());
        assert_eq!(value["completed_tasks"], 0);

        let episode = Episode::failure("t1", "describe", "boom");
        let value = serde_json::to_value(&episode).unwrap();
        for field in ["task_id", "input", "output", "success", "timestamp"] {
            assert!(value.get(field).is_some(), "missing episode field {field}");
        }
        assert_eq!(value["success"], false);
        assert_eq!(value["output"], "boom");
    }
}
