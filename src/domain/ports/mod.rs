//! Ports: the narrow trait seams between the orchestration core and its
//! collaborators. Implementations live under `infrastructure`.

pub mod audit;
pub mod memory;
pub mod reasoner;
pub mod reflector;
pub mod retriever;
pub mod tool;

pub use audit::AuditSink;
pub use memory::{MemoryRecord, MemoryStore, StmEntry};
pub use reasoner::Reasoner;
pub use reflector::Reflector;
pub use retriever::Retriever;
pub use tool::Tool;
