//! Pure halt-condition evaluation for the goal loop.

use crate::domain::models::StopConfig;

/// Tracks loop counters and decides when the goal loop must halt.
///
/// The three conditions are checked in precedence order: empty queue, then
/// the iteration ceiling, then the no-progress ceiling. `mark_progress` and
/// `mark_no_progress` are mutually exclusive per pass.
#[derive(Debug, Clone)]
pub struct StopTracker {
    cfg: StopConfig,
    iterations: u32,
    no_progress_steps: u32,
}

impl StopTracker {
    pub fn new(cfg: StopConfig) -> Self {
        Self {
            cfg,
            iterations: 0,
            no_progress_steps: 0,
        }
    }

    /// Count one loop pass, regardless of its outcome.
    pub fn tick_iteration(&mut self) {
        self.iterations += 1;
    }

    /// A pass made progress; the no-progress counter resets.
    pub fn mark_progress(&mut self) {
        self.no_progress_steps = 0;
    }

    /// A pass made no progress (nothing ready).
    pub fn mark_no_progress(&mut self) {
        self.no_progress_steps += 1;
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// `Some(reason)` when the goal loop must halt.
    pub fn should_stop(&self, queue_len: usize) -> Option<&'static str> {
        if queue_len == 0 {
            return Some("Halted: All tasks completed");
        }
        if self.iterations >= self.cfg.max_iterations {
            return Some("Halted: Max iterations reached");
        }
        if self.no_progress_steps >= self.cfg.max_no_progress {
            return Some("Halted: No progress");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_halts_regardless_of_counters() {
        let tracker = StopTracker::new(StopConfig::default());
        assert_eq!(tracker.should_stop(0), Some("Halted: All tasks completed"));

        // Still halts when every other counter is saturated.
        let mut tracker = StopTracker::new(StopConfig {
            max_iterations: 1,
            max_no_progress: 1,
        });
        tracker.tick_iteration();
        tracker.mark_no_progress();
        assert_eq!(tracker.should_stop(0), Some("Halted: All tasks completed"));
    }

    #[test]
    fn test_max_iterations_in_isolation() {
        let mut tracker = StopTracker::new(StopConfig {
            max_iterations: 3,
            max_no_progress: 100,
        });
        for _ in 0..2 {
            tracker.tick_iteration();
            assert_eq!(tracker.should_stop(1), None);
        }
        tracker.tick_iteration();
        assert_eq!(tracker.should_stop(1), Some("Halted: Max iterations reached"));
    }

    #[test]
    fn test_no_progress_in_isolation() {
        let mut tracker = StopTracker::new(StopConfig {
            max_iterations: 100,
            max_no_progress: 2,
        });
        tracker.mark_no_progress();
        assert_eq!(tracker.should_stop(1), None);
        tracker.mark_no_progress();
        assert_eq!(tracker.should_stop(1), Some("Halted: No progress"));
    }

    #[test]
    fn test_progress_resets_no_progress_counter() {
        let mut tracker = StopTracker::new(StopConfig {
            max_iterations: 100,
            max_no_progress: 2,
        });
        tracker.mark_no_progress();
        tracker.mark_progress();
        tracker.mark_no_progress();
        assert_eq!(tracker.should_stop(1), None);
    }

    #[test]
    fn test_iteration_ceiling_takes_precedence_over_no_progress() {
        let mut tracker = StopTracker::new(StopConfig {
            max_iterations: 1,
            max_no_progress: 1,
        });
        tracker.tick_iteration();
        tracker.mark_no_progress();
        assert_eq!(tracker.should_stop(1), Some("Halted: Max iterations reached"));
    }
}
