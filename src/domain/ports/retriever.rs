use async_trait::async_trait;

use crate::domain::models::RetrievedChunk;

/// Capability: given a query and a limit, produce a sequence of evidence
/// chunks. Retrieval failures degrade to an empty result, never an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, limit: usize) -> Vec<RetrievedChunk>;
}
