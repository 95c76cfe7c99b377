//! Retrieval-augmented generation: two-source retrieval, fingerprint
//! fusion, and deterministic cited synthesis.

pub mod fusion;
pub mod pipeline;
pub mod retrievers;

pub use fusion::RagFusion;
pub use pipeline::{RagOutput, RagPipeline};
pub use retrievers::{InternalRetriever, WebRetriever};
