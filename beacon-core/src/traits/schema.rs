use crate::event::Operation;

/// Pluggable payload schema check, consulted by the validation middleware
/// after the built-in required-field checks.
pub trait SchemaCheck: Send + Sync {
    /// Accept the operation or reject it with a human-readable reason.
    fn check(&self, operation: &Operation) -> Result<(), String>;
}
