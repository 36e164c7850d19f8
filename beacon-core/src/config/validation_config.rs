use serde::{Deserialize, Serialize};

use super::defaults;

/// Validation middleware configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// In strict mode invalid payloads are rejected back to the caller;
    /// otherwise they are logged and passed through unchanged.
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: defaults::DEFAULT_STRICT_VALIDATION,
        }
    }
}
