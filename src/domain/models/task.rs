//! Task domain model.
//!
//! Tasks are discrete units of work consumed by the orchestrator. They carry
//! a scheduling priority and a list of dependency ids; the queue only hands
//! out tasks whose dependencies have completed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Status of a task in the execution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is queued, waiting to be scheduled
    Pending,
    /// Task is currently being executed
    Running,
    /// Task completed successfully
    Completed,
    /// Task failed during execution
    Failed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "completed" | "complete" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A discrete unit of work that can be executed by the orchestrator.
///
/// Tasks are produced by a planner and are never deleted; the orchestrator
/// mutates `status` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, caller-supplied (e.g. "t1")
    pub id: String,
    /// Human-readable description; also the reasoner's input
    pub description: String,
    /// Scheduling priority; lower is more urgent
    #[serde(default)]
    pub priority: i64,
    /// Ids of tasks that must complete before this one is ready
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending task.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            priority: 0,
            depends_on: Vec::new(),
            status: TaskStatus::default(),
        }
    }

    /// Set priority (lower is more urgent).
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Add a dependency.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        let task_id = task_id.into();
        if task_id != self.id && !self.depends_on.contains(&task_id) {
            self.depends_on.push(task_id);
        }
        self
    }

    /// Whether every dependency is in the completed set.
    pub fn is_ready(&self, completed: &HashSet<String>) -> bool {
        self.depends_on.iter().all(|dep| completed.contains(dep))
    }
}
