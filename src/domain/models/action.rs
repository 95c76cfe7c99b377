//! Action plans produced by the reasoner.
//!
//! The reasoner maps a task description to exactly one [`ActionPlan`], which
//! is immutable once it has passed the safety policy.

use serde::{Deserialize, Serialize};

use crate::domain::models::tool::JsonMap;

/// The kind of action the reasoner proposes for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Internal reasoning; resolved through the retrieval pipeline
    Think,
    /// Direct invocation of a registered tool
    ToolCall,
    /// Human input is required before proceeding
    AskHuman,
    /// Do not execute this task
    Stop,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Think => "think",
            Self::ToolCall => "tool_call",
            Self::AskHuman => "ask_human",
            Self::Stop => "stop",
        }
    }
}

/// A requested tool invocation carried inside an [`ActionPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Registered tool name
    pub name: String,
    /// Structured tool input
    #[serde(default)]
    pub input: JsonMap,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, input: JsonMap) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// One proposed action for a task, produced fresh per reasoning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// What to do
    pub action: ActionKind,
    /// Why the reasoner chose this action
    pub rationale: String,
    /// Tool invocation payload, for [`ActionKind::ToolCall`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    /// Human-facing question, for [`ActionKind::AskHuman`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,
    /// Reason for stopping, for [`ActionKind::Stop`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    /// Set by the safety policy when the action needs human approval
    #[serde(default)]
    pub requires_approval: bool,
}

impl ActionPlan {
    /// An internal-reasoning plan.
    pub fn think(rationale: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Think,
            rationale: rationale.into(),
            tool_call: None,
            ask: None,
            stop_reason: None,
            requires_approval: false,
        }
    }

    /// A direct tool-call plan.
    pub fn tool_call(rationale: impl Into<String>, call: ToolCall) -> Self {
        Self {
            action: ActionKind::ToolCall,
            rationale: rationale.into(),
            tool_call: Some(call),
            ask: None,
            stop_reason: None,
            requires_approval: false,
        }
    }

    /// A plan that defers to a human.
    pub fn ask_human(rationale: impl Into<String>, ask: impl Into<String>) -> Self {
        Self {
            action: ActionKind::AskHuman,
            rationale: rationale.into(),
            tool_call: None,
            ask: Some(ask.into()),
            stop_reason: None,
            requires_approval: false,
        }
    }

    /// A plan that refuses to execute the task.
    pub fn stop(rationale: impl Into<String>, stop_reason: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Stop,
            rationale: rationale.into(),
            tool_call: None,
            ask: None,
            stop_reason: Some(stop_reason.into()),
            requires_approval: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_constructors() {
        let plan = ActionPlan::think("default step");
        assert_eq!(plan.action, ActionKind::Think);
        assert!(!plan.requires_approval);

        let plan = ActionPlan::stop("safety", "blocked");
        assert_eq!(plan.stop_reason.as_deref(), Some("blocked"));

        let call = ToolCall::new("web_search", JsonMap::new());
        let plan = ActionPlan::tool_call("need evidence", call);
        assert_eq!(plan.tool_call.as_ref().map(|c| c.name.as_str()), Some("web_search"));
    }
}
