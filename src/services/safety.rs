//! Stateless safety gate over reasoner output.
//!
//! Checks apply in a fixed order that is part of the contract: the blocked
//! keyword veto always wins over approval gating, and path validation only
//! applies to file-writing tool calls.

use crate::domain::models::tool::FILE_WRITER_TOOL;
use crate::domain::models::{ActionKind, ActionPlan, SafetyConfig};

/// Inspects a proposed plan and blocks it, demands approval, or passes it
/// through unchanged.
#[derive(Debug, Clone, Default)]
pub struct SafetyPolicy {
    cfg: SafetyConfig,
}

impl SafetyPolicy {
    pub fn new(cfg: SafetyConfig) -> Self {
        Self { cfg }
    }

    /// Apply the safety gates to `plan`, in order:
    ///
    /// 1. any blocked keyword in the task text overrides the whole plan with
    ///    a stop (never requiring approval);
    /// 2. otherwise any approval keyword flags the existing plan without
    ///    changing its action;
    /// 3. a file-writer call with a non-relative or traversing path is
    ///    overridden with a stop.
    pub fn check(&self, task_text: &str, mut plan: ActionPlan) -> ActionPlan {
        let lowered = task_text.to_lowercase();

        if self.cfg.blocked_keywords.iter().any(|k| lowered.contains(k.as_str())) {
            return ActionPlan::stop(
                "Safety gate: out-of-scope/blocked request detected.",
                "Blocked by safety policy",
            );
        }

        if self.cfg.approval_keywords.iter().any(|k| lowered.contains(k.as_str())) {
            plan.requires_approval = true;
        }

        if plan.action == ActionKind::ToolCall {
            if let Some(call) = &plan.tool_call {
                if call.name == FILE_WRITER_TOOL {
                    let path = call
                        .input
                        .get("path")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    if is_unsafe_path(path) {
                        return ActionPlan::stop(
                            "Safety gate: invalid file path requested.",
                            "Blocked path traversal / absolute path",
                        );
                    }
                }
            }
        }

        plan
    }
}

/// Relative paths only; no parent traversal, no absolute roots, no Windows
/// drive prefixes.
fn is_unsafe_path(path: &str) -> bool {
    path.starts_with("..") || path.starts_with('/') || path.contains(":\\")
}
