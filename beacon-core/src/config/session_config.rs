use serde::{Deserialize, Serialize};

use super::defaults;

/// Session middleware configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Property key the session id is written under.
    pub property_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            property_key: defaults::DEFAULT_SESSION_PROPERTY.to_string(),
        }
    }
}
