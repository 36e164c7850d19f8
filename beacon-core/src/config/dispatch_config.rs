use serde::{Deserialize, Serialize};

/// How plugin initialization failures are handled at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitErrorPolicy {
    /// Log each failure and keep going with the plugins that came up.
    #[default]
    ContinueOnError,
    /// Attempt every plugin, then fail startup if any returned an error.
    FailFast,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Policy applied when a plugin's `initialize` fails.
    pub init_error_policy: InitErrorPolicy,
}
