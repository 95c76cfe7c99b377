//! Run-scoped quality heuristics.
//!
//! Tracks repeated queries and consecutive low-quality scores across one
//! goal run. Both observations are read-then-write on plain counters; under
//! the single-threaded execution model no locking is needed, but a
//! concurrent orchestrator would have to serialize access.

use std::collections::VecDeque;

use crate::domain::models::MonitorConfig;

/// Stateful monitor over query repetition and score streaks.
#[derive(Debug, Clone)]
pub struct QualityMonitor {
    cfg: MonitorConfig,
    last_queries: VecDeque<String>,
    low_score_streak: u32,
}

impl QualityMonitor {
    pub fn new(cfg: MonitorConfig) -> Self {
        let capacity = cfg.history_capacity;
        Self {
            cfg,
            last_queries: VecDeque::with_capacity(capacity),
            low_score_streak: 0,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    /// Record a query; true when its normalized form now appears more than
    /// the configured repeat threshold within the bounded history.
    pub fn observe_query(&mut self, query: &str) -> bool {
        let normalized = query.trim().to_lowercase();
        while self.last_queries.len() >= self.cfg.history_capacity {
            self.last_queries.pop_front();
        }
        self.last_queries.push_back(normalized.clone());

        let count = self.last_queries.iter().filter(|q| **q == normalized).count();
        count > self.cfg.repeated_query_limit
    }

    /// Record a reflection score; true once the consecutive-low-score streak
    /// reaches the configured limit.
    pub fn observe_score(&mut self, score: f64) -> bool {
        if score < self.cfg.low_score_threshold {
            self.low_score_streak += 1;
        } else {
            self.low_score_streak = 0;
        }
        self.low_score_streak >= self.cfg.low_score_streak_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> QualityMonitor {
        QualityMonitor::new(MonitorConfig::default())
    }

    #[test]
    fn test_repeated_query_detection_is_normalized() {
        let mut m = monitor();
        assert!(!m.observe_query("agent memory"));
        assert!(!m.observe_query("  Agent Memory  "));
        // Third occurrence exceeds the default limit of 2.
        assert!(m.observe_query("AGENT MEMORY"));
    }

    #[test]
    fn test_history_eviction_forgets_old_queries() {
        let mut m = QualityMonitor::new(MonitorConfig {
            history_capacity: 2,
            repeated_query_limit: 1,
            ..MonitorConfig::default()
        });
        assert!(!m.observe_query("q"));
        assert!(m.observe_query("q"));
        // Two different queries push both "q" entries out of the window.
        assert!(!m.observe_query("a"));
        assert!(!m.observe_query("b"));
        assert!(!m.observe_query("q"));
    }

    #[test]
    fn test_low_score_streak() {
        let mut m = monitor();
        assert!(!m.observe_score(0.3));
        assert!(m.observe_score(0.5));
    }

    #[test]
    fn test_good_score_resets_streak() {
        let mut m = monitor();
        assert!(!m.observe_score(0.2));
        assert!(!m.observe_score(0.9));
        assert!(!m.observe_score(0.2));
        assert!(m.observe_score(0.2));
    }
}
