//! Consent gating.

use std::sync::Arc;

use async_trait::async_trait;

use beacon_core::config::ConsentConfig;
use beacon_core::consent::ConsentState;
use beacon_core::event::Operation;
use beacon_core::AnalyticsResult;

use crate::chain::{Disposition, DropReason, Middleware, Next};

/// Drops operations whose gating consent category is not granted.
///
/// The state handle is shared: the application mutates it from its consent
/// surface at any time, and each dispatch reads it at the moment the
/// operation reaches this stage. Denied operations are dropped, never queued
/// for retry.
pub struct ConsentMiddleware {
    state: Arc<ConsentState>,
    config: ConsentConfig,
}

impl ConsentMiddleware {
    /// Gate on an externally owned consent state.
    pub fn new(state: Arc<ConsentState>, config: ConsentConfig) -> Self {
        Self { state, config }
    }

    /// Build the state from the config's `default_granted` set; returns the
    /// middleware together with the shared handle for the application.
    pub fn from_config(config: ConsentConfig) -> (Self, Arc<ConsentState>) {
        let state = Arc::new(ConsentState::with_granted(
            config.default_granted.iter().cloned(),
        ));
        (Self::new(Arc::clone(&state), config), state)
    }

    /// The shared consent state handle.
    pub fn state(&self) -> &Arc<ConsentState> {
        &self.state
    }
}

#[async_trait]
impl Middleware for ConsentMiddleware {
    fn name(&self) -> &str {
        "consent"
    }

    async fn handle(&self, op: Operation, next: Next) -> AnalyticsResult<Disposition> {
        let kind = op.kind();
        let gate = self.config.gate_for(kind);
        if !self.state.is_granted(gate) {
            tracing::debug!("consent: {gate} denied, dropping {kind}");
            return Ok(Disposition::Dropped(DropReason::ConsentDenied {
                category: gate.clone(),
            }));
        }
        next.run(op).await
    }
}
