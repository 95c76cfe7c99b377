//! Evidence fusion: dedup, rank, cap.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::domain::models::{FusionConfig, RetrievedChunk};

/// Content fingerprint of normalized (trimmed, lower-cased) chunk text.
///
/// Chunks whose normalized text collides are duplicates regardless of
/// casing or surrounding whitespace.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.trim().to_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}

/// Merges evidence from multiple retrieval sources into one ranked list.
#[derive(Debug, Clone, Default)]
pub struct RagFusion {
    cfg: FusionConfig,
}

impl RagFusion {
    pub fn new(cfg: FusionConfig) -> Self {
        Self { cfg }
    }

    /// Deduplicate by content fingerprint (first occurrence wins), sort by
    /// citation confidence descending (stable for ties), truncate to the
    /// configured maximum.
    pub fn fuse(&self, chunks: Vec<RetrievedChunk>) -> Vec<RetrievedChunk> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut deduped: Vec<RetrievedChunk> = Vec::new();
        for chunk in chunks {
            if seen.insert(fingerprint(&chunk.text)) {
                deduped.push(chunk);
            }
        }

        deduped.sort_by(|a, b| {
            b.citation
                .confidence
                .partial_cmp(&a.citation.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        deduped.truncate(self.cfg.max_chunks);
        deduped
    }
}
