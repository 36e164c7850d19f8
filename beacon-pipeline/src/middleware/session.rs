//! Session enrichment.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use beacon_core::config::SessionConfig;
use beacon_core::event::Operation;
use beacon_core::AnalyticsResult;

use crate::chain::{Disposition, Middleware, Next};

/// Stamps every operation with this pipeline instance's session id.
///
/// The id is minted once at construction and stays stable for the lifetime
/// of the middleware. The property is only written when absent, so a caller
/// (or an upstream stage) can pin its own value.
pub struct SessionMiddleware {
    session_id: String,
    property_key: String,
}

impl SessionMiddleware {
    /// Random v4 session id.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_session_id(Uuid::new_v4().to_string(), config)
    }

    /// Caller-chosen session id.
    pub fn with_session_id(session_id: impl Into<String>, config: SessionConfig) -> Self {
        Self {
            session_id: session_id.into(),
            property_key: config.property_key,
        }
    }

    /// The id stamped on operations.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[async_trait]
impl Middleware for SessionMiddleware {
    fn name(&self) -> &str {
        "session"
    }

    async fn handle(&self, mut op: Operation, next: Next) -> AnalyticsResult<Disposition> {
        op.properties_mut()
            .entry(self.property_key.clone())
            .or_insert_with(|| Value::String(self.session_id.clone()));
        next.run(op).await
    }
}
