//! Wires the orchestrator together from configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::domain::ports::{AuditSink, MemoryStore};
use crate::infrastructure::audit::FsAuditSink;
use crate::infrastructure::sqlite::{create_pool, SqliteMemoryStore};
use crate::infrastructure::tools::{FileWriterTool, WebSearchTool};
use crate::infrastructure::AgentMemory;
use crate::services::rag::{InternalRetriever, RagFusion, RagPipeline, WebRetriever};
use crate::services::{
    Orchestrator, QualityMonitor, RuleReasoner, RuleReflector, SafetyPolicy, ToolExecutor,
    ToolRegistry,
};

/// Build the production memory store from config.
pub async fn build_memory(config: &Config) -> Result<Arc<AgentMemory>> {
    let pool = create_pool(&config.database.path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    let ltm = SqliteMemoryStore::new(pool).await?;

    let snapshot_path = Path::new(&config.database.path)
        .parent()
        .map(|dir| dir.join("stm.json"));

    let memory = match snapshot_path {
        Some(path) => AgentMemory::new(ltm).with_snapshot_path(path),
        None => AgentMemory::new(ltm),
    };
    Ok(Arc::new(memory))
}

/// Assemble a fully wired orchestrator over the given memory store.
pub fn build_orchestrator(config: &Config, memory: Arc<AgentMemory>) -> Result<Orchestrator> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WebSearchTool))?;
    registry.register(Arc::new(FileWriterTool::new(&config.artifacts.dir)))?;

    let tools = Arc::new(ToolExecutor::new(registry, config.executor.clone()));

    let memory_port: Arc<dyn MemoryStore> = memory;
    let rag = RagPipeline::new(
        Arc::new(WebRetriever::new(Arc::clone(&tools))),
        Arc::new(InternalRetriever::new(Arc::clone(&memory_port))),
        RagFusion::new(config.fusion.clone()),
    );

    let safety = SafetyPolicy::new(config.safety.clone());
    let reasoner = RuleReasoner::new(safety, config.retrieval.limit);
    let reflector = RuleReflector::new(config.reflector.clone());
    let monitor = QualityMonitor::new(config.monitor.clone());
    let audit: Arc<dyn AuditSink> = Arc::new(FsAuditSink::new(&config.audit.dir));

    Ok(Orchestrator::new(
        Box::new(reasoner),
        Box::new(reflector),
        tools,
        rag,
        memory_port,
        audit,
        monitor,
        config.retrieval.clone(),
        config.stop.clone(),
    ))
}
