//! Service layer: the orchestration core and its collaborating components.

pub mod orchestrator;
pub mod quality;
pub mod rag;
pub mod rule_reasoner;
pub mod safety;
pub mod stop_tracker;
pub mod task_queue;
pub mod tool_executor;

pub use orchestrator::{Orchestrator, TaskRun};
pub use quality::{QualityMonitor, RuleReflector};
pub use rule_reasoner::RuleReasoner;
pub use safety::SafetyPolicy;
pub use stop_tracker::StopTracker;
pub use task_queue::{PopReady, TaskQueue};
pub use tool_executor::{RegistryError, ToolExecutor, ToolRegistry};
