//! Retrieval evidence models.
//!
//! Chunks are ephemeral: produced per retrieval call, fused into an ordered
//! sequence, and discarded once the synthesized answer is persisted.

use serde::{Deserialize, Serialize};

/// Which retrieval source produced a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Web,
    Internal,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Internal => "internal",
        }
    }
}

/// Provenance of a retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Source tag
    pub source: SourceKind,
    /// Source identifier (URL or memory record id)
    pub source_id: String,
    /// ISO-8601 retrieval timestamp
    pub timestamp: String,
    /// Short excerpt of the evidence
    pub snippet: String,
    /// Retrieval confidence in [0, 1]
    pub confidence: f64,
}

/// One piece of retrieved evidence with its citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub text: String,
    pub citation: Citation,
}
