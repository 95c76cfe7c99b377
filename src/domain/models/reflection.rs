//! Reflection result model.

use serde::{Deserialize, Serialize};

/// Quality assessment of a produced result.
///
/// `score` is clamped to [0, 1] after heuristic adjustments. `redo` and
/// `escalate_to_human` are independent: a result can warrant a retry without
/// human attention, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionResult {
    /// Quality score in [0, 1]
    pub score: f64,
    /// Detected problems
    #[serde(default)]
    pub issues: Vec<String>,
    /// Suggested improvements
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Whether the result should be re-attempted
    #[serde(default)]
    pub redo: bool,
    /// Refined follow-up query to use on redo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_query: Option<String>,
    /// Whether the run needs human attention
    #[serde(default)]
    pub escalate_to_human: bool,
}
