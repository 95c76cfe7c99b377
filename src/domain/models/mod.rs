//! Domain models: pure data shapes with no I/O.

pub mod action;
pub mod config;
pub mod reflection;
pub mod retrieval;
pub mod state;
pub mod task;
pub mod tool;

pub use action::{ActionKind, ActionPlan, ToolCall};
pub use config::{
    ArtifactsConfig, AuditConfig, Config, DatabaseConfig, ExecutorConfig, FusionConfig,
    LoggingConfig, MonitorConfig, ReflectorConfig, RetrievalConfig, SafetyConfig, StopConfig,
};
pub use reflection::ReflectionResult;
pub use retrieval::{Citation, RetrievedChunk, SourceKind};
pub use state::{AgentState, AgentStatus, Episode};
pub use task::{Task, TaskStatus};
pub use tool::{JsonMap, ToolError, ToolErrorCode, ToolRequest, ToolResponse};
