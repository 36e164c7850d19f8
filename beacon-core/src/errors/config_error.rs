//! Configuration and construction errors.

/// Errors that can occur while building a pipeline or loading its config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("duplicate plugin name: {name}")]
    DuplicatePlugin { name: String },

    #[error("config parse error: {message}")]
    ParseError { message: String },
}
