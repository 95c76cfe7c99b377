//! Tool registry and retrying executor.
//!
//! The executor isolates tool failures from orchestration failures: every
//! outcome, including unknown tools and contained panics, comes back as a
//! [`ToolResponse`]. Only transient/timeout error codes are retried, with a
//! sleep proportional to the attempt number between tries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::{ExecutorConfig, ToolError, ToolErrorCode, ToolRequest, ToolResponse};
use crate::domain::ports::Tool;

/// Registration error.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool `{0}` already registered")]
    Duplicate(String),
}

/// Name-to-implementation mapping over the [`Tool`] capability.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Dispatches named tool calls with bounded retry and linear backoff.
pub struct ToolExecutor {
    registry: ToolRegistry,
    cfg: ExecutorConfig,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry, cfg: ExecutorConfig) -> Self {
        Self { registry, cfg }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Execute `request`, retrying transient failures up to the configured
    /// bound. Never returns a raw fault: panics inside a tool are contained
    /// and converted to an executor-fault response.
    pub async fn execute(&self, request: ToolRequest) -> ToolResponse {
        let request = if request.trace_id.is_some() {
            request
        } else {
            let trace_id = Uuid::new_v4().to_string();
            request.with_trace_id(trace_id)
        };

        let Some(tool) = self.registry.get(&request.name) else {
            warn!(tool = %request.name, "tool lookup failed");
            return ToolResponse::failure(
                &request.name,
                ToolError::new(
                    ToolErrorCode::UnknownTool,
                    format!("tool `{}` is not registered", request.name),
                ),
            );
        };

        let mut attempts: u32 = 0;
        let mut last_transient: Option<ToolResponse> = None;

        while attempts <= self.cfg.max_retries {
            attempts += 1;
            let mut response = invoke_contained(Arc::clone(&tool), request.clone()).await;
            response.attempts = attempts;

            if response.ok {
                debug!(
                    tool = %response.name,
                    attempts,
                    trace_id = request.trace_id.as_deref().unwrap_or(""),
                    "tool call succeeded"
                );
                return response;
            }

            if response.is_transient_failure() {
                let delay = Duration::from_millis(self.cfg.backoff_ms * u64::from(attempts));
                debug!(
                    tool = %response.name,
                    attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient tool failure, backing off"
                );
                last_transient = Some(response);
                sleep(delay).await;
                continue;
            }

            warn!(tool = %response.name, attempts, "tool call failed");
            return response;
        }

        last_transient.unwrap_or_else(|| {
            ToolResponse::failure(
                &request.name,
                ToolError::new(ToolErrorCode::Failed, "Tool failed after retries"),
            )
            .with_attempts(attempts)
        })
    }
}

/// Run a tool on its own task so an unexpected panic surfaces as a join
/// error instead of unwinding through the orchestrator.
async fn invoke_contained(tool: Arc<dyn Tool>, request: ToolRequest) -> ToolResponse {
    let name = request.name.clone();
    let handle = tokio::spawn(async move { tool.run(request).await });
    match handle.await {
        Ok(response) => response,
        Err(err) => {
            let message = if err.is_panic() {
                "tool panicked during execution"
            } else {
                "tool task was cancelled"
            };
            warn!(tool = %name, message, "contained tool fault");
            ToolResponse::failure(&name, ToolError::new(ToolErrorCode::ExecutorFault, message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::JsonMap;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with the given code `failures` times, then succeeds.
    struct FlakyTool {
        code: ToolErrorCode,
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl Tool for FlakyTool {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn run(&self, _request: ToolRequest) -> ToolResponse {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                ToolResponse::failure("flaky", ToolError::new(self.code, "try again"))
            } else {
                ToolResponse::success("flaky", JsonMap::new())
            }
        }
    }

    struct PanickyTool;

    #[async_trait]
    impl Tool for PanickyTool {
        fn name(&self) -> &str {
            "panicky"
        }

        async fn run(&self, _request: ToolRequest) -> ToolResponse {
            panic!("unexpected fault")
        }
    }

    fn executor_with(tool: Arc<dyn Tool>) -> ToolExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(tool).unwrap();
        ToolExecutor::new(
            registry,
            ExecutorConfig {
                max_retries: 2,
                backoff_ms: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_without_retry() {
        let executor = ToolExecutor::new(ToolRegistry::new(), ExecutorConfig::default());
        let response = executor.execute(ToolRequest::new("nope", JsonMap::new())).await;
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ToolErrorCode::UnknownTool);
        assert_eq!(response.attempts, 1);
    }

    #[tokio::test]
    async fn test_transient_retried_then_last_response_returned() {
        let tool = Arc::new(FlakyTool {
            code: ToolErrorCode::Transient,
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let executor = executor_with(tool.clone());
        let response = executor.execute(ToolRequest::new("flaky", JsonMap::new())).await;

        // 1 initial attempt + exactly max_retries additional tries.
        assert_eq!(tool.calls.load(Ordering::SeqCst), 3);
        assert!(!response.ok);
        assert_eq!(response.attempts, 3);
        assert_eq!(response.error.unwrap().code, ToolErrorCode::Transient);
    }

    #[tokio::test]
    async fn test_transient_recovers_mid_retry() {
        let tool = Arc::new(FlakyTool {
            code: ToolErrorCode::Timeout,
            failures: 1,
            calls: AtomicU32::new(0),
        });
        let executor = executor_with(tool);
        let response = executor.execute(ToolRequest::new("flaky", JsonMap::new())).await;
        assert!(response.ok);
        assert_eq!(response.attempts, 2);
    }

    #[tokio::test]
    async fn test_non_transient_not_retried() {
        let tool = Arc::new(FlakyTool {
            code: ToolErrorCode::InvalidInput,
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let executor = executor_with(tool.clone());
        let response = executor.execute(ToolRequest::new("flaky", JsonMap::new())).await;

        assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
        assert!(!response.ok);
        assert_eq!(response.attempts, 1);
    }

    #[tokio::test]
    async fn test_panic_contained_as_executor_fault() {
        let executor = executor_with(Arc::new(PanickyTool));
        let response = executor.execute(ToolRequest::new("panicky", JsonMap::new())).await;
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ToolErrorCode::ExecutorFault);
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(FlakyTool {
                code: ToolErrorCode::Transient,
                failures: 0,
                calls: AtomicU32::new(0),
            }))
            .unwrap();
        let err = registry.register(Arc::new(FlakyTool {
            code: ToolErrorCode::Transient,
            failures: 0,
            calls: AtomicU32::new(0),
        }));
        assert!(matches!(err, Err(RegistryError::Duplicate(name)) if name == "flaky"));
    }
}
