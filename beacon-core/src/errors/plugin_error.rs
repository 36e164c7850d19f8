//! Plugin delivery and initialization errors.

/// Errors a plugin can produce while initializing or delivering.
///
/// Delivery errors are isolated per plugin: the dispatcher logs and counts
/// them without failing the dispatch or affecting sibling plugins.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("endpoint rejected payload with status {status}")]
    Rejected { status: u16 },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("initialization failed: {reason}")]
    InitFailed { reason: String },
}

/// One plugin's initialization failure, collected during startup.
#[derive(Debug)]
pub struct InitFailure {
    /// Name of the plugin that failed.
    pub plugin: String,
    /// The error it returned.
    pub error: PluginError,
}
