//! Required-field and schema validation.

use std::sync::Arc;

use async_trait::async_trait;

use beacon_core::config::ValidationConfig;
use beacon_core::errors::ValidationError;
use beacon_core::event::Operation;
use beacon_core::traits::SchemaCheck;
use beacon_core::AnalyticsResult;

use crate::chain::{Disposition, Middleware, Next};

/// Checks each payload's required field, then the optional schema check.
///
/// Strict mode rejects invalid payloads back to the caller; lenient mode
/// logs them and lets the operation continue unchanged.
pub struct ValidationMiddleware {
    config: ValidationConfig,
    schema: Option<Arc<dyn SchemaCheck>>,
}

impl ValidationMiddleware {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            schema: None,
        }
    }

    /// Layer an application-supplied schema check on top of the built-in
    /// required-field checks.
    pub fn with_schema(config: ValidationConfig, schema: Arc<dyn SchemaCheck>) -> Self {
        Self {
            config,
            schema: Some(schema),
        }
    }

    fn check(&self, op: &Operation) -> Result<(), ValidationError> {
        let kind = op.kind();
        match op {
            Operation::Track(event) if event.name.trim().is_empty() => {
                return Err(ValidationError::MissingField {
                    kind,
                    field: "name",
                });
            }
            Operation::Page(view) if view.path.trim().is_empty() => {
                return Err(ValidationError::MissingField {
                    kind,
                    field: "path",
                });
            }
            Operation::Identify(identity) if identity.user_id.trim().is_empty() => {
                return Err(ValidationError::MissingField {
                    kind,
                    field: "user_id",
                });
            }
            _ => {}
        }
        if let Some(schema) = &self.schema {
            schema
                .check(op)
                .map_err(|message| ValidationError::SchemaRejected { kind, message })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Middleware for ValidationMiddleware {
    fn name(&self) -> &str {
        "validation"
    }

    async fn handle(&self, op: Operation, next: Next) -> AnalyticsResult<Disposition> {
        if let Err(err) = self.check(&op) {
            if self.config.strict {
                return Err(err.into());
            }
            tracing::warn!("validation: {err} (lenient mode, passing through)");
        }
        next.run(op).await
    }
}
