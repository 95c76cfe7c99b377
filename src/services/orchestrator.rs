//! The top-level orchestration state machine.
//!
//! `run_once` drives one task through plan → execute → reflect with a
//! bounded redo loop; `run_goal` schedules tasks in dependency order until
//! the stop tracker halts. Execution is strictly sequential: at most one
//! task is ever in flight.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::models::tool::FILE_WRITER_TOOL;
use crate::domain::models::{
    ActionKind, AgentState, AgentStatus, Episode, JsonMap, RetrievalConfig, StopConfig, Task,
    TaskStatus, ToolRequest,
};
use crate::domain::ports::{AuditSink, MemoryStore, Reasoner, Reflector};
use crate::services::rag::RagPipeline;
use crate::services::{PopReady, QualityMonitor, StopTracker, TaskQueue, ToolExecutor};

/// Outcome of one task execution.
///
/// Run-level failures (safety veto, human input required, tool failure,
/// escalation) are all carried here as a reason string; they are not
/// distinguished by error type. Infrastructure failures (audit sink,
/// memory store) surface as hard `Err`s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRun {
    Success { output: String },
    Failure { reason: String },
}

impl TaskRun {
    fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// Single-agent orchestrator composing the scheduler, reasoner, executor,
/// retrieval pipeline, and quality gates, with every transition audited.
pub struct Orchestrator {
    reasoner: Box<dyn Reasoner>,
    reflector: Box<dyn Reflector>,
    tools: Arc<ToolExecutor>,
    rag: RagPipeline,
    memory: Arc<dyn MemoryStore>,
    audit: Arc<dyn AuditSink>,
    monitor: QualityMonitor,
    retrieval: RetrievalConfig,
    stop: StopConfig,
    state: AgentState,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reasoner: Box<dyn Reasoner>,
        reflector: Box<dyn Reflector>,
        tools: Arc<ToolExecutor>,
        rag: RagPipeline,
        memory: Arc<dyn MemoryStore>,
        audit: Arc<dyn AuditSink>,
        monitor: QualityMonitor,
        retrieval: RetrievalConfig,
        stop: StopConfig,
    ) -> Self {
        Self {
            reasoner,
            reflector,
            tools,
            rag,
            memory,
            audit,
            monitor,
            retrieval,
            stop,
            state: AgentState::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Execute one task to completion or failure.
    ///
    /// `current_task` is cleared and the state persisted on every exit path,
    /// including infrastructure errors.
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub async fn run_once(&mut self, task: &mut Task, final_task: bool) -> Result<TaskRun> {
        self.state.status = AgentStatus::Running;
        self.state.current_task = Some(task.id.clone());
        task.status = TaskStatus::Running;
        self.audit
            .save_state(&self.state)
            .await
            .context("Failed to persist running state")?;

        self.memory
            .add_to_stm("task", &task.description, Some(task_meta(task)))
            .await?;

        let run = match self.execute_task(task, final_task).await {
            Ok(run) => run,
            Err(err) => {
                // Infrastructure fault: still release the current task.
                self.state.current_task = None;
                self.state.status = AgentStatus::Failed;
                let _ = self.audit.save_state(&self.state).await;
                return Err(err);
            }
        };

        match &run {
            TaskRun::Success { output } => {
                let episode = Episode::success(&task.id, &task.description, output);
                self.audit
                    .append_episode(&episode)
                    .await
                    .context("Failed to append success episode")?;

                self.memory
                    .add_to_stm("result", output, Some(task_meta(task)))
                    .await?;
                let mut metadata = task_meta(task);
                metadata.insert("success".into(), Value::Bool(true));
                self.memory
                    .remember_long_term(
                        &format!("episode:{}:{}", task.id, episode.timestamp),
                        &format!("Task: {}\nOutput: {}", task.description, output),
                        &["episode", "policy_run"],
                        metadata,
                    )
                    .await?;

                self.state.completed_tasks += 1;
                self.state.status = AgentStatus::Completed;
                task.status = TaskStatus::Completed;
            }
            TaskRun::Failure { reason } => {
                let episode = Episode::failure(&task.id, &task.description, reason);
                self.audit
                    .append_episode(&episode)
                    .await
                    .context("Failed to append failure episode")?;

                self.memory
                    .add_to_stm("error", reason, Some(task_meta(task)))
                    .await?;
                let mut metadata = task_meta(task);
                metadata.insert("success".into(), Value::Bool(false));
                self.memory
                    .remember_long_term(
                        &format!("error:{}:{}", task.id, episode.timestamp),
                        &format!("Task: {}\nError: {}", task.description, reason),
                        &["error", "episode"],
                        metadata,
                    )
                    .await?;

                self.state.status = AgentStatus::Failed;
                task.status = TaskStatus::Failed;
            }
        }

        self.state.current_task = None;
        self.audit
            .save_state(&self.state)
            .await
            .context("Failed to persist final state")?;

        Ok(run)
    }

    /// Seed the queue and run tasks in dependency order until the stop
    /// tracker halts. Returns the halt reason.
    ///
    /// A failing task is marked completed for scheduling purposes so it
    /// never stalls its dependents; the skip is logged distinctly.
    #[instrument(skip(self, tasks), fields(task_count = tasks.len()))]
    pub async fn run_goal(&mut self, goal: &str, tasks: Vec<Task>) -> Result<String> {
        let mut tracker = StopTracker::new(self.stop.clone());
        let mut completed: HashSet<String> = HashSet::new();
        let mut queue = TaskQueue::new();
        queue.push_many(tasks);

        info!(goal, tasks = queue.len(), "goal received");
        self.memory.add_to_stm("goal", goal, None).await?;

        loop {
            if let Some(reason) = tracker.should_stop(queue.len()) {
                info!(reason, iterations = tracker.iterations(), "goal loop halting");
                self.memory.add_to_stm("halt", reason, None).await?;
                return Ok(reason.to_string());
            }

            tracker.tick_iteration();

            let mut task = match queue.pop_ready(&completed) {
                PopReady::Ready(task) => task,
                PopReady::Blocked | PopReady::Empty => {
                    tracker.mark_no_progress();
                    continue;
                }
            };

            // The pop that drains the queue runs the goal's final task.
            let final_task = queue.is_empty();

            match self.run_once(&mut task, final_task).await? {
                TaskRun::Success { .. } => {
                    completed.insert(task.id.clone());
                    tracker.mark_progress();
                    info!(task_id = %task.id, "task executed");
                }
                TaskRun::Failure { reason } => {
                    // Loop breaker: don't stall the whole run on one failure.
                    completed.insert(task.id.clone());
                    tracker.mark_progress();
                    warn!(task_id = %task.id, %reason, "task failed (skipped)");
                    self.memory
                        .add_to_stm(
                            "skip",
                            &format!("Skipped failed task: {}", task.id),
                            Some(task_meta(&task)),
                        )
                        .await?;
                }
            }
        }
    }

    /// The plan/execute/reflect core of `run_once`, with the bounded redo
    /// loop. Every branch reports through [`TaskRun`]; only infrastructure
    /// faults escape as errors.
    async fn execute_task(&mut self, task: &Task, final_task: bool) -> Result<TaskRun> {
        let plan = self.reasoner.plan(&task.description);
        self.memory
            .add_to_stm("plan", &serde_json::to_string(&plan)?, Some(task_meta(task)))
            .await?;

        if plan.requires_approval {
            return Ok(TaskRun::failure(
                "Approval required by safety policy for this action.",
            ));
        }
        match plan.action {
            ActionKind::Stop => {
                return Ok(TaskRun::failure(
                    plan.stop_reason
                        .unwrap_or_else(|| "Stopped by reasoner policy.".to_string()),
                ));
            }
            ActionKind::AskHuman => {
                return Ok(TaskRun::failure(
                    plan.ask
                        .unwrap_or_else(|| "Human input required by reasoner policy.".to_string()),
                ));
            }
            ActionKind::Think | ActionKind::ToolCall => {}
        }

        let max_redos = self.monitor.config().max_redos_per_task;
        let mut redos: u32 = 0;
        let mut query = task.description.clone();

        loop {
            let repeated = self.monitor.observe_query(&query);

            let result_text = if plan.action == ActionKind::ToolCall {
                let call = plan
                    .tool_call
                    .as_ref()
                    .context("tool_call plan without payload")?;
                let request = ToolRequest::new(&call.name, call.input.clone())
                    .with_trace_id(format!("{}-policy", task.id));
                let response = self.tools.execute(request).await;
                if !response.ok {
                    let reason = response
                        .error
                        .map_or_else(|| "Tool failed".to_string(), |e| e.message);
                    return Ok(TaskRun::failure(reason));
                }
                serde_json::to_string(&response.output)?
            } else {
                self.run_retrieval(task, &query, final_task).await?
            };

            let reflection = self.reflector.reflect(&task.description, &result_text);
            let reflection_json = serde_json::to_string(&reflection)?;
            self.memory
                .add_to_stm("reflection", &reflection_json, Some(task_meta(task)))
                .await?;
            let mut metadata = task_meta(task);
            metadata.insert("score".into(), json_f64(reflection.score));
            self.memory
                .remember_long_term(
                    &format!("reflection:{}:{}", task.id, chrono::Utc::now().to_rfc3339()),
                    &reflection_json,
                    &["reflection", "quality"],
                    metadata,
                )
                .await?;

            let low_streak = self.monitor.observe_score(reflection.score);

            if repeated || low_streak || reflection.escalate_to_human {
                return Ok(TaskRun::failure(
                    "Escalate to human: repeated queries or low-quality streak detected.",
                ));
            }

            if reflection.redo && redos < max_redos {
                redos += 1;
                query = reflection
                    .suggested_query
                    .unwrap_or_else(|| format!("{query} best practices"));
                self.memory
                    .add_to_stm(
                        "redo",
                        &format!("Redo #{redos} with query: {query}"),
                        Some(task_meta(task)),
                    )
                    .await?;
                continue;
            }

            return Ok(TaskRun::Success {
                output: result_text,
            });
        }
    }

    /// Think branch: run the retrieval pipeline, persist the fused evidence
    /// and the synthesized answer, and write the goal summary for the final
    /// task.
    async fn run_retrieval(&mut self, task: &Task, query: &str, final_task: bool) -> Result<String> {
        let rag = self.rag.run(query, self.retrieval.limit).await;

        for (idx, chunk) in rag.fused.iter().enumerate() {
            let mut metadata = task_meta(task);
            metadata.insert(
                "source".into(),
                Value::String(chunk.citation.source.as_str().to_string()),
            );
            metadata.insert(
                "source_id".into(),
                Value::String(chunk.citation.source_id.clone()),
            );
            metadata.insert("confidence".into(), json_f64(chunk.citation.confidence));
            metadata.insert(
                "timestamp".into(),
                Value::String(chunk.citation.timestamp.clone()),
            );
            self.memory
                .remember_long_term(
                    &format!(
                        "retrieval:{}:{}:{}",
                        task.id,
                        idx + 1,
                        chunk.citation.timestamp
                    ),
                    &chunk.text,
                    &["retrieval", "chunk", chunk.citation.source.as_str()],
                    metadata,
                )
                .await?;
        }

        let chunks_jsonl = rag
            .fused
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n");

        self.write_artifact(
            &format!("task_{}/chunks.jsonl", task.id),
            &chunks_jsonl,
            &format!("{}-chunks", task.id),
        )
        .await;
        self.write_artifact(
            &format!("task_{}/answer.md", task.id),
            &rag.answer,
            &format!("{}-answer", task.id),
        )
        .await;

        if final_task {
            self.write_artifact(
                "summary.md",
                &format!("# Final Output\n\n{}\n", rag.answer),
                &format!("{}-write", task.id),
            )
            .await;
        }

        Ok(rag.answer)
    }

    /// Best-effort artifact write through the file tool; a failed write is
    /// logged, not fatal to the task.
    async fn write_artifact(&self, path: &str, content: &str, trace_id: &str) {
        let mut input = JsonMap::new();
        input.insert("path".into(), Value::String(path.to_string()));
        input.insert("content".into(), Value::String(content.to_string()));
        let request = ToolRequest::new(FILE_WRITER_TOOL, input).with_trace_id(trace_id.to_string());
        let response = self.tools.execute(request).await;
        if !response.ok {
            warn!(path, "artifact write failed");
        }
    }
}

fn task_meta(task: &Task) -> JsonMap {
    let mut meta = JsonMap::new();
    meta.insert("task_id".into(), Value::String(task.id.clone()));
    meta
}

fn json_f64(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
