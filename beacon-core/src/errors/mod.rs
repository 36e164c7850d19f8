//! Error handling for Beacon.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod plugin_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use plugin_error::{InitFailure, PluginError};
pub use validation_error::ValidationError;

/// Errors surfaced to callers of the dispatcher.
/// Aggregates subsystem errors via `From` conversions.
///
/// Plugin delivery failures never appear here: a failing sink is logged and
/// counted, not propagated. The only plugin-shaped variant is [`Init`],
/// produced under the fail-fast initialization policy.
///
/// [`Init`]: AnalyticsError::Init
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("initialization failed for {} plugin(s)", .failures.len())]
    Init { failures: Vec<InitFailure> },
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
