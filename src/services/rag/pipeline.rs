//! Retrieval-fusion-synthesis pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::domain::models::RetrievedChunk;
use crate::domain::ports::Retriever;
use crate::services::rag::RagFusion;

/// The pipeline's product: a synthesized cited answer plus the fused
/// evidence it was built from.
#[derive(Debug, Clone)]
pub struct RagOutput {
    pub answer: String,
    pub fused: Vec<RetrievedChunk>,
}

/// Queries both retrieval sources, fuses the evidence, and synthesizes a
/// deterministic cited report.
///
/// The report format is a contract: the reflector keys on the literal
/// `Citations:` section label and the 1-based `[n]` markers.
pub struct RagPipeline {
    web: Arc<dyn Retriever>,
    internal: Arc<dyn Retriever>,
    fusion: RagFusion,
}

impl RagPipeline {
    pub fn new(web: Arc<dyn Retriever>, internal: Arc<dyn Retriever>, fusion: RagFusion) -> Self {
        Self {
            web,
            internal,
            fusion,
        }
    }

    /// Run both sources with the same query and limit, fuse, synthesize.
    pub async fn run(&self, query: &str, limit: usize) -> RagOutput {
        let mut chunks = self.web.retrieve(query, limit).await;
        chunks.extend(self.internal.retrieve(query, limit).await);
        debug!(query, raw = chunks.len(), "retrieval complete");

        let fused = self.fusion.fuse(chunks);
        let answer = synthesize(query, &fused);
        RagOutput { answer, fused }
    }
}

fn synthesize(query: &str, fused: &[RetrievedChunk]) -> String {
    if fused.is_empty() {
        return format!("No evidence found for: {query}");
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Query: {query}"));
    lines.push(String::new());
    lines.push("Evidence-based notes:".to_string());
    lines.push(String::new());

    for (i, chunk) in fused.iter().enumerate() {
        let snippet = chunk.text.replace('\n', " ").trim().to_string();
        lines.push(format!("- {} [{}]", snippet, i + 1));
    }

    lines.push(String::new());
    lines.push("Citations:".to_string());
    for (i, chunk) in fused.iter().enumerate() {
        let c = &chunk.citation;
        lines.push(format!(
            "[{}] {} | {} | {} | conf={:.2}",
            i + 1,
            c.source.as_str(),
            c.source_id,
            c.timestamp,
            c.confidence
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Citation, FusionConfig, SourceKind};
    use async_trait::async_trait;

    struct FixedRetriever {
        chunks: Vec<RetrievedChunk>,
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str, limit: usize) -> Vec<RetrievedChunk> {
            self.chunks.iter().take(limit).cloned().collect()
        }
    }

    fn chunk(text: &str, source: SourceKind, confidence: f64) -> RetrievedChunk {
        RetrievedChunk {
            text: text.to_string(),
            citation: Citation {
                source,
                source_id: format!("src-{text}"),
                timestamp: "2025-01-01T00:00:00Z".to_string(),
                snippet: text.to_string(),
                confidence,
            },
        }
    }

    fn pipeline(web: Vec<RetrievedChunk>, internal: Vec<RetrievedChunk>) -> RagPipeline {
        RagPipeline::new(
            Arc::new(FixedRetriever { chunks: web }),
            Arc::new(FixedRetriever { chunks: internal }),
            RagFusion::new(FusionConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_no_evidence_message() {
        let p = pipeline(Vec::new(), Vec::new());
        let out = p.run("missing topic", 5).await;
        assert_eq!(out.answer, "No evidence found for: missing topic");
        assert!(out.fused.is_empty());
    }

    #[tokio::test]
    async fn test_report_structure() {
        let p = pipeline(
            vec![chunk("web fact", SourceKind::Web, 0.6)],
            vec![chunk("internal fact", SourceKind::Internal, 0.7)],
        );
        let out = p.run("agent memory", 5).await;

        assert!(out.answer.starts_with("Query: agent memory"));
        assert!(out.answer.contains("Evidence-based notes:"));
        // Internal outranks web (0.7 > 0.6), so it carries marker [1].
        assert!(out.answer.contains("- internal fact [1]"));
        assert!(out.answer.contains("- web fact [2]"));
        assert!(out.answer.contains("Citations:"));
        assert!(out.answer.contains("[1] internal | src-internal fact | 2025-01-01T00:00:00Z | conf=0.70"));
        assert!(out.answer.contains("[2] web | src-web fact | 2025-01-01T00:00:00Z | conf=0.60"));
    }

    #[tokio::test]
    async fn test_cross_source_dedup() {
        let p = pipeline(
            vec![chunk("Shared Fact", SourceKind::Web, 0.6)],
            vec![chunk("shared fact", SourceKind::Internal, 0.7)],
        );
        let out = p.run("q", 5).await;
        assert_eq!(out.fused.len(), 1);
    }

    #[tokio::test]
    async fn test_multiline_chunks_flattened_in_notes() {
        let p = pipeline(vec![chunk("title\nsnippet body", SourceKind::Web, 0.6)], Vec::new());
        let out = p.run("q", 5).await;
        assert!(out.answer.contains("- title snippet body [1]"));
    }
}
