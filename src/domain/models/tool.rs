//! Tool request/response wire shapes.
//!
//! Every tool behind the registry speaks these structures. Failures are data
//! carried in [`ToolResponse::error`], never Rust errors: `ok == false`
//! implies `error` is present, and `attempts >= 1`.

use serde::{Deserialize, Serialize};

/// Structured JSON object used for tool inputs and outputs.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Registry name of the search capability the reasoner targets.
pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Registry name of the file-writing capability the safety policy guards.
pub const FILE_WRITER_TOOL: &str = "file_writer";

/// Machine-readable classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorCode {
    /// Required request field missing or malformed; not retried
    InvalidInput,
    /// Policy or path violation; never retried
    Security,
    /// Temporary failure; eligible for retry with backoff
    Transient,
    /// The tool timed out; eligible for retry with backoff
    Timeout,
    /// No tool registered under the requested name
    UnknownTool,
    /// A tool raised an unexpected fault that was contained by the executor
    ExecutorFault,
    /// The tool itself failed while running
    RuntimeError,
    /// Retries exhausted without a definitive response
    Failed,
}

impl ToolErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::Security => "SECURITY",
            Self::Transient => "TRANSIENT",
            Self::Timeout => "TIMEOUT",
            Self::UnknownTool => "UNKNOWN_TOOL",
            Self::ExecutorFault => "EXECUTOR_FAULT",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::Failed => "FAILED",
        }
    }

    /// Whether the executor should retry after this failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient | Self::Timeout)
    }
}

/// Structured error attached to a failed [`ToolResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: ToolErrorCode,
    pub message: String,
    #[serde(default)]
    pub details: JsonMap,
}

impl ToolError {
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: JsonMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// A request dispatched to a named tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Registered tool name
    pub name: String,
    /// Structured input mapping
    #[serde(default)]
    pub input: JsonMap,
    /// Correlation id threaded through audit logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ToolRequest {
    pub fn new(name: impl Into<String>, input: JsonMap) -> Self {
        Self {
            name: name.into(),
            input,
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Fetch a string field from the input, trimmed; `None` when absent.
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(|v| v.as_str()).map(str::trim)
    }
}

/// The outcome of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Whether the invocation succeeded
    pub ok: bool,
    /// Echoed tool name
    pub name: String,
    /// Structured output mapping
    #[serde(default)]
    pub output: JsonMap,
    /// Present exactly when `ok == false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Number of attempts made, at least 1
    pub attempts: u32,
    /// Wall-clock duration of the final attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResponse {
    /// A successful response.
    pub fn success(name: impl Into<String>, output: JsonMap) -> Self {
        Self {
            ok: true,
            name: name.into(),
            output,
            error: None,
            attempts: 1,
            duration_ms: None,
        }
    }

    /// A failed response carrying a structured error.
    pub fn failure(name: impl Into<String>, error: ToolError) -> Self {
        Self {
            ok: false,
            name: name.into(),
            output: JsonMap::new(),
            error: Some(error),
            attempts: 1,
            duration_ms: None,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Whether the attached error, if any, is retryable.
    pub fn is_transient_failure(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.code.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_error() {
        let resp = ToolResponse::failure(
            "web_search",
            ToolError::new(ToolErrorCode::InvalidInput, "Missing 'query'"),
        );
        assert!(!resp.ok);
        assert!(resp.error.is_some());
        assert_eq!(resp.attempts, 1);
    }

    #[test]
    fn test_transient_classification() {
        assert!(ToolErrorCode::Transient.is_transient());
        assert!(ToolErrorCode::Timeout.is_transient());
        assert!(!ToolErrorCode::Security.is_transient());
        assert!(!ToolErrorCode::UnknownTool.is_transient());
    }

    #[test]
    fn test_attempts_floor() {
        let resp = ToolResponse::success("echo", JsonMap::new()).with_attempts(0);
        assert_eq!(resp.attempts, 1);
    }
}
