//! Top-level pipeline configuration with 3-layer resolution.

use serde::{Deserialize, Serialize};

use super::{
    BatchConfig, ConsentConfig, DispatcherConfig, PrivacyConfig, SessionConfig,
    ValidationConfig,
};
use crate::constants::{MAX_BATCH_SIZE, MAX_BATCH_WAIT_MS};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`BEACON_*`)
/// 2. TOML provided by the embedding application
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub dispatcher: DispatcherConfig,
    pub validation: ValidationConfig,
    pub consent: ConsentConfig,
    pub privacy: PrivacyConfig,
    pub session: SessionConfig,
    pub batch: BatchConfig,
}

impl AnalyticsConfig {
    /// Load configuration with 3-layer resolution and validate the result.
    pub fn load(toml_str: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match toml_str {
            Some(s) => Self::from_toml(s)?,
            None => Self::default(),
        };
        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    /// Unknown keys are silently ignored (forward-compatible).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &AnalyticsConfig) -> Result<(), ConfigError> {
        if config.batch.max_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.batch.max_size > MAX_BATCH_SIZE {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_size".to_string(),
                message: format!("must be at most {MAX_BATCH_SIZE}"),
            });
        }
        if config.batch.max_wait_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_wait_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.batch.max_wait_ms > MAX_BATCH_WAIT_MS {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_wait_ms".to_string(),
                message: format!("must be at most {MAX_BATCH_WAIT_MS}"),
            });
        }
        if config.session.property_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "session.property_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if config.privacy.sensitive_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "privacy.sensitive_fields".to_string(),
                message: "entries must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Apply `BEACON_*` environment variable overrides.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(config: &mut AnalyticsConfig) {
        if let Ok(val) = std::env::var("BEACON_VALIDATION_STRICT") {
            if let Ok(v) = val.parse::<bool>() {
                config.validation.strict = v;
            }
        }
        if let Ok(val) = std::env::var("BEACON_BATCH_MAX_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.batch.max_size = v;
            }
        }
        if let Ok(val) = std::env::var("BEACON_BATCH_MAX_WAIT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.batch.max_wait_ms = v;
            }
        }
        if let Ok(val) = std::env::var("BEACON_SESSION_PROPERTY") {
            if !val.trim().is_empty() {
                config.session.property_key = val;
            }
        }
        if let Ok(val) = std::env::var("BEACON_INIT_ERROR_POLICY") {
            match val.as_str() {
                "continue_on_error" => {
                    config.dispatcher.init_error_policy =
                        super::InitErrorPolicy::ContinueOnError;
                }
                "fail_fast" => {
                    config.dispatcher.init_error_policy = super::InitErrorPolicy::FailFast;
                }
                _ => {}
            }
        }
    }
}
