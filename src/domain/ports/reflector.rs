use crate::domain::models::ReflectionResult;

/// Capability: score a produced result against the originating task.
pub trait Reflector: Send + Sync {
    fn reflect(&self, task_text: &str, result_text: &str) -> ReflectionResult;
}
