//! Quality gating: result scoring and run-scoped repetition/streak tracking.

pub mod monitor;
pub mod reflector;

pub use monitor::QualityMonitor;
pub use reflector::RuleReflector;
