//! Stub web search tool.
//!
//! Deterministic placeholder results, clearly flagged as stub data so the
//! reflector's stub penalty can recognize them. Swap in a real backend by
//! registering a different [`Tool`] under the same name.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::models::tool::WEB_SEARCH_TOOL;
use crate::domain::models::{JsonMap, ToolError, ToolErrorCode, ToolRequest, ToolResponse};
use crate::domain::ports::Tool;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    async fn run(&self, request: ToolRequest) -> ToolResponse {
        let start = Instant::now();
        let query = request.input_str("query").unwrap_or_default().to_string();
        if query.is_empty() {
            return ToolResponse::failure(
                WEB_SEARCH_TOOL,
                ToolError::new(ToolErrorCode::InvalidInput, "Missing 'query'"),
            )
            .with_duration_ms(elapsed_ms(start));
        }

        let results = vec![json!({
            "title": "Stub result: Agent memory overview",
            "snippet": format!("Stubbed web_search result for query: '{query}'."),
            "url": "https://example.com/stub",
        })];

        let mut output = JsonMap::new();
        output.insert("query".into(), Value::String(query));
        output.insert("results".into(), Value::Array(results));

        ToolResponse::success(WEB_SEARCH_TOOL, output).with_duration_ms(elapsed_ms(start))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
