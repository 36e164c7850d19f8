use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch middleware configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Buffer size that triggers an immediate flush.
    pub max_size: usize,
    /// Longest an event may sit in the buffer before a timer flush (ms).
    pub max_wait_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_size: defaults::DEFAULT_BATCH_MAX_SIZE,
            max_wait_ms: defaults::DEFAULT_BATCH_MAX_WAIT_MS,
        }
    }
}
