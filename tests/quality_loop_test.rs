//! Redo/escalation behavior when retrieval produces no usable evidence.
//!
//! Wires an orchestrator whose registry has no search tool at all: the web
//! retriever degrades to nothing, the pipeline reports no evidence, and the
//! quality gates take over.

use std::sync::Arc;

use cogent::domain::models::{Config, Task};
use cogent::domain::ports::{AuditSink, MemoryStore};
use cogent::infrastructure::sqlite::create_test_pool;
use cogent::infrastructure::{AgentMemory, FsAuditSink, SqliteMemoryStore};
use cogent::services::rag::{InternalRetriever, RagFusion, RagPipeline, WebRetriever};
use cogent::{
    Orchestrator, QualityMonitor, RuleReasoner, RuleReflector, SafetyPolicy, ToolExecutor,
    ToolRegistry,
};

async fn no_evidence_orchestrator(dir: &tempfile::TempDir) -> (Orchestrator, Arc<AgentMemory>) {
    let config = Config::default();

    let pool = create_test_pool().await.unwrap();
    let memory = Arc::new(AgentMemory::new(SqliteMemoryStore::new(pool).await.unwrap()));
    let memory_port: Arc<dyn MemoryStore> = Arc::clone(&memory) as Arc<dyn MemoryStore>;

    // Empty registry: every tool call fails, every retrieval comes back dry.
    let tools = Arc::new(ToolExecutor::new(ToolRegistry::new(), config.executor.clone()));

    let rag = RagPipeline::new(
        Arc::new(WebRetriever::new(Arc::clone(&tools))),
        Arc::new(InternalRetriever::new(Arc::clone(&memory_port))),
        RagFusion::new(config.fusion.clone()),
    );

    let orchestrator = Orchestrator::new(
        Box::new(RuleReasoner::new(
            SafetyPolicy::new(config.safety.clone()),
            config.retrieval.limit,
        )),
        Box::new(RuleReflector::new(config.reflector.clone())),
        tools,
        rag,
        memory_port,
        Arc::new(FsAuditSink::new(dir.path().join("audit"))),
        QualityMonitor::new(config.monitor.clone()),
        config.retrieval.clone(),
        config.stop.clone(),
    );

    (orchestrator, memory)
}

#[tokio::test]
async fn test_no_evidence_triggers_redo_then_low_streak_escalation() {
    let dir = tempfile::tempdir().unwrap();
    let (mut orchestrator, memory) = no_evidence_orchestrator(&dir).await;

    // "No evidence found for: ..." scores exactly 0.40: redo fires, and the
    // second consecutive low score trips the streak limit.
    let tasks = vec![Task::new("t1", "Draft the design retrospective")];
    let reason = orchestrator.run_goal("Retrospective", tasks).await.unwrap();
    assert_eq!(reason, "Halted: All tasks completed");

    let sink = FsAuditSink::new(dir.path().join("audit"));
    let episodes = sink.load_recent_episodes(10).await.unwrap();
    assert_eq!(episodes.len(), 1);
    assert!(!episodes[0].success);
    assert!(episodes[0].output.starts_with("Escalate to human"));

    // Exactly one redo happened before escalation, with the reflector's
    // suggested query.
    let snapshot = memory.stm_snapshot().await;
    let redos: Vec<_> = snapshot.iter().filter(|e| e.kind == "redo").collect();
    assert_eq!(redos.len(), 1);
    assert!(redos[0]
        .content
        .contains("Draft the design retrospective overview examples best practices"));
}

#[tokio::test]
async fn test_direct_tool_call_with_missing_tool_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let (mut orchestrator, _memory) = no_evidence_orchestrator(&dir).await;

    // Evidence markers route this to a direct search call, but nothing is
    // registered: the run fails with the executor's error message.
    let tasks = vec![Task::new("t1", "Collect sources on schedulers")];
    orchestrator.run_goal("Evidence", tasks).await.unwrap();

    let sink = FsAuditSink::new(dir.path().join("audit"));
    let episodes = sink.load_recent_episodes(10).await.unwrap();
    assert!(!episodes[0].success);
    assert!(episodes[0].output.contains("web_search"));
    assert!(episodes[0].output.contains("not registered"));
}
