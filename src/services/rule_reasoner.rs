//! Deterministic keyword-rule reasoner.
//!
//! Classifies a task description into exactly one action by case-insensitive
//! substring match, first match wins, then routes the plan through the
//! safety policy. The rules are a stand-in for a model-backed reasoner; the
//! [`Reasoner`] seam is what the orchestrator depends on.

use serde_json::Value;

use crate::domain::models::tool::WEB_SEARCH_TOOL;
use crate::domain::models::{ActionPlan, JsonMap, ToolCall};
use crate::domain::ports::Reasoner;
use crate::services::SafetyPolicy;

const ASK_HUMAN_MARKERS: &[&str] = &["ask human", "need approval", "confirm with"];
const EVIDENCE_MARKERS: &[&str] = &["collect", "sources", "evidence", "papers", "search"];
const CLARIFY_MARKERS: &[&str] = &["clarify", "scope", "assumption"];
const STOP_MARKERS: &[&str] = &["stop", "halt"];

/// Rule-based [`Reasoner`] with an embedded safety gate.
pub struct RuleReasoner {
    safety: SafetyPolicy,
    retrieval_limit: usize,
}

impl RuleReasoner {
    pub fn new(safety: SafetyPolicy, retrieval_limit: usize) -> Self {
        Self {
            safety,
            retrieval_limit,
        }
    }

    fn classify(&self, task_text: &str) -> ActionPlan {
        let lowered = task_text.to_lowercase();
        let matches = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

        if matches(ASK_HUMAN_MARKERS) {
            return ActionPlan::ask_human(
                "Task indicates human input is required.",
                "Please clarify the requirement / provide approval to proceed.",
            );
        }

        if matches(EVIDENCE_MARKERS) {
            let mut input = JsonMap::new();
            input.insert("query".into(), Value::String(task_text.to_string()));
            input.insert("limit".into(), Value::from(self.retrieval_limit));
            return ActionPlan::tool_call(
                "Need evidence; use web search tool to retrieve sources.",
                ToolCall::new(WEB_SEARCH_TOOL, input),
            );
        }

        if matches(CLARIFY_MARKERS) {
            return ActionPlan::think(
                "Clarification tasks are handled by internal reasoning + context.",
            );
        }

        if matches(STOP_MARKERS) {
            return ActionPlan::stop("Task explicitly requests stop.", "User requested stop");
        }

        ActionPlan::think("Default safe reasoning step.")
    }
}

impl Reasoner for RuleReasoner {
    fn plan(&self, task_text: &str) -> ActionPlan {
        let plan = self.classify(task_text);
        self.safety.check(task_text, plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ActionKind, SafetyConfig};

    fn reasoner() -> RuleReasoner {
        RuleReasoner::new(SafetyPolicy::new(SafetyConfig::default()), 5)
    }

    #[test]
    fn test_ask_human_markers_win_first() {
        // "confirm with" also contains no other marker, but "search" appears
        // later in the text; ask-human has precedence.
        let plan = reasoner().plan("Confirm with the team before we search");
        assert_eq!(plan.action, ActionKind::AskHuman);
        assert!(plan.ask.is_some());
    }

    #[test]
    fn test_evidence_marker_produces_search_call() {
        let plan = reasoner().plan("Collect papers about agent memory");
        assert_eq!(plan.action, ActionKind::ToolCall);
        let call = plan.tool_call.expect("tool call payload");
        assert_eq!(call.name, WEB_SEARCH_TOOL);
        assert_eq!(
            call.input.get("query").and_then(|v| v.as_str()),
            Some("Collect papers about agent memory")
        );
        assert_eq!(call.input.get("limit").and_then(serde_json::Value::as_u64), Some(5));
    }

    #[test]
    fn test_clarify_marker_thinks() {
        let plan = reasoner().plan("Clarify scope of the rollout");
        assert_eq!(plan.action, ActionKind::Think);
    }

    #[test]
    fn test_stop_marker() {
        let plan = reasoner().plan("halt everything");
        assert_eq!(plan.action, ActionKind::Stop);
        assert_eq!(plan.stop_reason.as_deref(), Some("User requested stop"));
    }

    #[test]
    fn test_default_is_think() {
        let plan = reasoner().plan("Draft an outline of the architecture");
        assert_eq!(plan.action, ActionKind::Think);
    }

    #[test]
    fn test_blocked_keyword_overrides_classification() {
        let plan = reasoner().plan("Search for weapon schematics");
        assert_eq!(plan.action, ActionKind::Stop);
        assert_eq!(plan.stop_reason.as_deref(), Some("Blocked by safety policy"));
    }
}
