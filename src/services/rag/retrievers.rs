//! Retrieval source adapters.
//!
//! Both adapters sit over existing ports: the web retriever drives the
//! search tool through the executor, the internal retriever queries
//! long-term memory. Either degrades to an empty result on failure.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::models::tool::WEB_SEARCH_TOOL;
use crate::domain::models::{Citation, JsonMap, RetrievedChunk, SourceKind, ToolRequest};
use crate::domain::ports::{MemoryStore, Retriever};
use crate::services::ToolExecutor;

const SNIPPET_CHARS: usize = 240;
const WEB_CONFIDENCE: f64 = 0.60;
const INTERNAL_CONFIDENCE: f64 = 0.70;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Retrieves evidence via the registered search tool.
pub struct WebRetriever {
    tools: Arc<ToolExecutor>,
}

impl WebRetriever {
    pub fn new(tools: Arc<ToolExecutor>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Retriever for WebRetriever {
    async fn retrieve(&self, query: &str, limit: usize) -> Vec<RetrievedChunk> {
        let mut input = JsonMap::new();
        input.insert("query".into(), serde_json::Value::String(query.to_string()));
        input.insert("limit".into(), serde_json::Value::from(limit));
        let request = ToolRequest::new(WEB_SEARCH_TOOL, input)
            .with_trace_id(format!("web:{}", truncate_chars(query, 24)));

        let response = self.tools.execute(request).await;
        if !response.ok {
            debug!(query, "web retrieval failed, returning no chunks");
            return Vec::new();
        }

        let timestamp = Utc::now().to_rfc3339();
        let results = response
            .output
            .get("results")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut chunks = Vec::new();
        for result in results.iter().take(limit) {
            let url = result.get("url").and_then(|v| v.as_str()).unwrap_or_default();
            let title = result
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .trim();
            let snippet = result
                .get("snippet")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .trim();

            let text: String = [title, snippet]
                .iter()
                .filter(|p| !p.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            if text.is_empty() {
                continue;
            }

            chunks.push(RetrievedChunk {
                text,
                citation: Citation {
                    source: SourceKind::Web,
                    source_id: if url.is_empty() { "unknown".to_string() } else { url.to_string() },
                    timestamp: timestamp.clone(),
                    snippet: truncate_chars(snippet, SNIPPET_CHARS),
                    confidence: WEB_CONFIDENCE,
                },
            });
        }
        chunks
    }
}

/// Retrieves evidence from long-term memory.
pub struct InternalRetriever {
    memory: Arc<dyn MemoryStore>,
}

impl InternalRetriever {
    pub fn new(memory: Arc<dyn MemoryStore>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Retriever for InternalRetriever {
    async fn retrieve(&self, query: &str, limit: usize) -> Vec<RetrievedChunk> {
        let records = match self.memory.recall_long_term(query, limit).await {
            Ok(records) => records,
            Err(err) => {
                debug!(query, %err, "memory recall failed, returning no chunks");
                return Vec::new();
            }
        };

        let timestamp = Utc::now().to_rfc3339();
        records
            .into_iter()
            .filter(|r| !r.text.trim().is_empty())
            .map(|r| {
                let text = r.text.trim().to_string();
                RetrievedChunk {
                    citation: Citation {
                        source: SourceKind::Internal,
                        source_id: r.id,
                        timestamp: timestamp.clone(),
                        snippet: truncate_chars(&text, SNIPPET_CHARS),
                        confidence: INTERNAL_CONFIDENCE,
                    },
                    text,
                }
            })
            .collect()
    }
}
