use serde::{Deserialize, Serialize};

/// What the privacy middleware does to a matched property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyAction {
    /// Remove the property entirely.
    #[default]
    Redact,
    /// Replace the value with a deterministic one-way hash, preserving
    /// cross-event correlation without the raw value.
    Hash,
}

/// Privacy middleware configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Top-level property names to scrub. Matched exactly, no nesting.
    pub sensitive_fields: Vec<String>,
    /// Applied to every matched property.
    pub action: PrivacyAction,
}
