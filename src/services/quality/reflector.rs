//! Heuristic result scoring.

use crate::domain::models::{ReflectionResult, ReflectorConfig};
use crate::domain::ports::Reflector;

/// Rule-based [`Reflector`].
///
/// Starts at 1.0 and subtracts fixed penalties, each independently
/// triggerable: a short result, recognizable stub/placeholder text, and a
/// missing citation structure. Redo and escalation thresholds are evaluated
/// on the adjusted score before it is clamped to [0, 1].
#[derive(Debug, Clone, Default)]
pub struct RuleReflector {
    cfg: ReflectorConfig,
}

const SHORT_RESULT_PENALTY: f64 = 0.35;
const STUB_PENALTY: f64 = 0.30;
const MISSING_CITATIONS_PENALTY: f64 = 0.25;
const REDO_THRESHOLD: f64 = 0.55;
const ESCALATE_THRESHOLD: f64 = 0.40;

impl RuleReflector {
    pub fn new(cfg: ReflectorConfig) -> Self {
        Self { cfg }
    }

    fn looks_like_stub(&self, text: &str) -> bool {
        self.cfg.stub_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

impl Reflector for RuleReflector {
    fn reflect(&self, task_text: &str, result_text: &str) -> ReflectionResult {
        let mut issues = Vec::new();
        let mut improvements = Vec::new();
        let mut score = 1.0;

        let txt = result_text.trim();

        if txt.chars().count() < self.cfg.min_chars {
            score -= SHORT_RESULT_PENALTY;
            issues.push("Answer too short / low detail.".to_string());
            improvements.push("Add more evidence and a structured synthesis.".to_string());
        }

        if self.looks_like_stub(txt) {
            score -= STUB_PENALTY;
            issues.push("Evidence looks like stub/demo data.".to_string());
            improvements.push("Broaden query or use internal memory for richer context.".to_string());
        }

        let has_citations_block = txt.contains("Citations:");
        let has_numbered_refs = has_bracket_marker(txt);
        if !(has_citations_block && has_numbered_refs) {
            score -= MISSING_CITATIONS_PENALTY;
            issues.push("Missing citation structure.".to_string());
            improvements.push("Ensure evidence is fused and cited as [1], [2], ...".to_string());
        }

        let redo = score < REDO_THRESHOLD;
        let suggested_query = redo
            .then(|| format!("{task_text} overview examples best practices"));
        let escalate_to_human = score < ESCALATE_THRESHOLD;

        ReflectionResult {
            score: score.clamp(0.0, 1.0),
            issues,
            improvements,
            redo,
            suggested_query,
            escalate_to_human,
        }
    }
}

/// A numeric bracket marker like `[1]`, without pulling in a regex engine.
fn has_bracket_marker(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while let Some(offset) = text[i..].find('[') {
        let start = i + offset + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > start && bytes.get(end) == Some(&b']') {
            return true;
        }
        i = start;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflector() -> RuleReflector {
        RuleReflector::new(ReflectorConfig::default())
    }

    fn well_formed_result() -> String {
        let mut lines = vec!["Query: agent memory".to_string(), String::new()];
        lines.push("Evidence-based notes:".to_string());
        lines.push(String::new());
        lines.push("- Hierarchical memories decay unless promoted by repeated access [1]".to_string());
        lines.push("- Episodic records replay past failures into future plans [2]".to_string());
        lines.push(String::new());
        lines.push("Citations:".to_string());
        lines.push("[1] internal | mem-1 | 2025-01-01T00:00:00Z | conf=0.70".to_string());
        lines.push("[2] internal | mem-2 | 2025-01-01T00:00:00Z | conf=0.70".to_string());
        lines.join("\n")
    }

    #[test]
    fn test_clean_result_scores_full_marks() {
        let result = reflector().reflect("agent memory", &well_formed_result());
        assert!((result.score - 1.0).abs() < f64::EPSILON);
        assert!(!result.redo);
        assert!(!result.escalate_to_human);
        assert!(result.issues.is_empty());
        assert!(result.suggested_query.is_none());
    }

    #[test]
    fn test_short_uncited_result_hits_escalation_boundary() {
        // 1.0 - 0.35 - 0.25 = 0.40: redo fires, escalation does not.
        let result = reflector().reflect("topic", "Too short, no citations.");
        assert!((result.score - 0.40).abs() < 1e-9);
        assert!(result.redo);
        assert!(!result.escalate_to_human);
        assert_eq!(
            result.suggested_query.as_deref(),
            Some("topic overview examples best practices")
        );
    }

    #[test]
    fn test_just_below_escalation_boundary() {
        // Adding the stub penalty drops the score to 0.10, under both
        // thresholds.
        let result = reflector().reflect("topic", "Stubbed web_search output only.");
        assert!((result.score - 0.10).abs() < 1e-9);
        assert!(result.redo);
        assert!(result.escalate_to_human);
    }

    #[test]
    fn test_just_above_escalation_boundary() {
        // Only the stub penalty: 0.70 stays above both thresholds.
        let mut text = well_formed_result();
        text.push_str("\nStubbed web_search marker");
        let result = reflector().reflect("topic", &text);
        assert!((result.score - 0.70).abs() < 1e-9);
        assert!(!result.redo);
        assert!(!result.escalate_to_human);
    }

    #[test]
    fn test_penalties_are_independent() {
        let result = reflector().reflect("topic", "Stubbed web_search");
        // Short + stub + no citations.
        assert!((result.score - 0.10).abs() < 1e-9);
        assert_eq!(result.issues.len(), 3);
    }

    #[test]
    fn test_stub_markers_are_pluggable() {
        let custom = RuleReflector::new(ReflectorConfig {
            stub_markers: vec!["lorem ipsum".to_string()],
            ..ReflectorConfig::default()
        });
        let mut text = well_formed_result();
        text.push_str("\nlorem ipsum filler");
        let result = custom.reflect("topic", &text);
        assert!((result.score - 0.70).abs() < 1e-9);

        // The default markers no longer trigger.
        let mut text = well_formed_result();
        text.push_str("\nStubbed web_search");
        let result = custom.reflect("topic", &text);
        assert!((result.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bracket_marker_detection() {
        assert!(has_bracket_marker("see [1] for details"));
        assert!(has_bracket_marker("[12]"));
        assert!(!has_bracket_marker("no markers [] here"));
        assert!(!has_bracket_marker("[x] not numeric"));
    }
}
