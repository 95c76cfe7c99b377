//! Cogent - Single-Agent Task Orchestration Engine
//!
//! Cogent runs a goal decomposed into dependency-ordered tasks through a
//! quality-gated execution loop: a rule-based reasoner proposes one action
//! per task (gated by a safety policy), work is carried out directly through
//! tools or via a retrieval-fusion pipeline, results are scored by a
//! reflector, and a bounded retry/escalation state machine decides whether
//! to refine the query, hand off to a human, or move on. Every state
//! transition and execution attempt lands in an auditable trail.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): pure models and the ports (trait seams)
//!   the core depends on
//! - **Service Layer** (`services`): scheduler, reasoner, quality gates,
//!   retrieval pipeline, tool executor, and the orchestrator composing them
//! - **Infrastructure Layer** (`infrastructure`): SQLite memory, filesystem
//!   audit sink, built-in tools, config and logging setup
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use cogent::domain::models::Task;
//! use cogent::infrastructure::{build_memory, build_orchestrator, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let memory = build_memory(&config).await?;
//!     let mut orchestrator = build_orchestrator(&config, memory)?;
//!
//!     let tasks = vec![
//!         Task::new("t1", "Clarify scope of the survey"),
//!         Task::new("t2", "Draft the survey outline").with_dependency("t1"),
//!     ];
//!     let halt = orchestrator.run_goal("Write a survey", tasks).await?;
//!     println!("{halt}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ActionKind, ActionPlan, AgentState, AgentStatus, Citation, Config, Episode, ReflectionResult,
    RetrievedChunk, SourceKind, Task, TaskStatus, ToolError, ToolErrorCode, ToolRequest,
    ToolResponse,
};
pub use domain::ports::{AuditSink, MemoryStore, Reasoner, Reflector, Retriever, Tool};
pub use infrastructure::{AgentMemory, ConfigError, ConfigLoader, FsAuditSink};
pub use services::{
    Orchestrator, PopReady, QualityMonitor, RuleReasoner, RuleReflector, SafetyPolicy,
    StopTracker, TaskQueue, TaskRun, ToolExecutor, ToolRegistry,
};
