//! The plugin contract: capability-declared delivery endpoints.

use async_trait::async_trait;

use crate::errors::PluginError;
use crate::event::{AnalyticsEvent, Identity, OperationKind, PageView};

/// What a plugin has declared it handles.
///
/// The dispatcher consults this before every call: a plugin is only invoked
/// for operations whose capability it declares, so delivery methods never see
/// operations they did not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub initialize: bool,
    pub track: bool,
    pub page: bool,
    pub identify: bool,
}

impl Capabilities {
    /// Nothing declared.
    pub const fn none() -> Self {
        Self {
            initialize: false,
            track: false,
            page: false,
            identify: false,
        }
    }

    /// Everything declared, including initialization.
    pub const fn all() -> Self {
        Self {
            initialize: true,
            track: true,
            page: true,
            identify: true,
        }
    }

    /// All three delivery operations, no initialization step.
    pub const fn delivery_only() -> Self {
        Self {
            initialize: false,
            track: true,
            page: true,
            identify: true,
        }
    }

    /// Whether the given operation kind is declared.
    pub fn supports(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Track => self.track,
            OperationKind::Page => self.page,
            OperationKind::Identify => self.identify,
        }
    }
}

/// A terminal delivery endpoint for the pipeline.
///
/// Plugins are registered with the dispatcher and receive every operation
/// that survives the middleware chain, filtered by their [`Capabilities`].
/// Delivery errors are isolated: the dispatcher logs and counts them without
/// failing the dispatch or affecting sibling plugins.
///
/// Default method bodies are no-ops so a plugin only implements the
/// operations it declares.
#[async_trait]
pub trait AnalyticsPlugin: Send + Sync {
    /// Unique plugin name, used for registry lookups and log lines.
    fn name(&self) -> &str;

    /// The operations this plugin wants to receive.
    fn capabilities(&self) -> Capabilities;

    /// One-time setup, called before any delivery. Only invoked when the
    /// `initialize` capability is declared.
    async fn initialize(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Deliver a track event.
    async fn track(&self, _event: &AnalyticsEvent) -> Result<(), PluginError> {
        Ok(())
    }

    /// Deliver a page view.
    async fn page(&self, _view: &PageView) -> Result<(), PluginError> {
        Ok(())
    }

    /// Deliver an identity.
    async fn identify(&self, _identity: &Identity) -> Result<(), PluginError> {
        Ok(())
    }
}
