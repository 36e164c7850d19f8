//! Property scrubbing: redact or hash configured sensitive fields.

use async_trait::async_trait;
use serde_json::Value;

use beacon_core::config::{PrivacyAction, PrivacyConfig};
use beacon_core::event::Operation;
use beacon_core::AnalyticsResult;

use crate::chain::{Disposition, Middleware, Next};

/// Scrubs configured properties before they can reach any plugin.
///
/// Field names are matched exactly against top-level property keys (traits
/// for identify). Values under other keys pass untouched, including nested
/// objects that happen to contain a matching key.
pub struct PrivacyMiddleware {
    config: PrivacyConfig,
}

impl PrivacyMiddleware {
    pub fn new(config: PrivacyConfig) -> Self {
        Self { config }
    }
}

/// Deterministic one-way hash of a property value, as written by
/// [`PrivacyAction::Hash`].
///
/// Strings hash their raw contents rather than the JSON-quoted form, so the
/// same value produces the same hash wherever it appears; other values hash
/// their canonical JSON.
pub fn hash_property_value(value: &Value) -> String {
    let hash = match value {
        Value::String(s) => blake3::hash(s.as_bytes()),
        other => blake3::hash(other.to_string().as_bytes()),
    };
    hash.to_hex().to_string()
}

#[async_trait]
impl Middleware for PrivacyMiddleware {
    fn name(&self) -> &str {
        "privacy"
    }

    async fn handle(&self, mut op: Operation, next: Next) -> AnalyticsResult<Disposition> {
        let properties = op.properties_mut();
        for field in &self.config.sensitive_fields {
            match self.config.action {
                PrivacyAction::Redact => {
                    properties.remove(field);
                }
                PrivacyAction::Hash => {
                    if let Some(value) = properties.get_mut(field) {
                        let hashed = hash_property_value(value);
                        *value = Value::String(hashed);
                    }
                }
            }
        }
        next.run(op).await
    }
}
