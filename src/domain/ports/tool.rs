use async_trait::async_trait;

use crate::domain::models::{ToolRequest, ToolResponse};

/// Capability: execute one structured request and report the outcome as data.
///
/// Tools never surface Rust errors; every failure mode is encoded in the
/// response (`ok == false` with a structured error). The executor contains
/// anything that escapes anyway.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry name of this tool.
    fn name(&self) -> &str;

    /// Run the tool.
    async fn run(&self, request: ToolRequest) -> ToolResponse;
}
