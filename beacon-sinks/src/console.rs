//! Console sink: structured log-line delivery for local development.

use async_trait::async_trait;

use beacon_core::errors::PluginError;
use beacon_core::event::{AnalyticsEvent, Identity, PageView};
use beacon_core::traits::{AnalyticsPlugin, Capabilities};

/// Prints every operation as a structured log line.
///
/// Delivery-only, no initialization step. Typically the first plugin wired
/// into a new pipeline to watch traffic flow. `with_enabled(false)` builds
/// a muted sink that accepts operations silently, so the wiring stays in
/// place while the output is off.
pub struct ConsoleSink {
    enabled: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// A sink that can be muted at construction.
    pub fn with_enabled(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsPlugin for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::delivery_only()
    }

    async fn track(&self, event: &AnalyticsEvent) -> Result<(), PluginError> {
        if !self.enabled {
            return Ok(());
        }
        tracing::info!(
            name = %event.name,
            properties = %serde_json::Value::Object(event.properties.clone()),
            "console: track"
        );
        Ok(())
    }

    async fn page(&self, view: &PageView) -> Result<(), PluginError> {
        if !self.enabled {
            return Ok(());
        }
        tracing::info!(
            path = %view.path,
            title = view.title.as_deref().unwrap_or(""),
            properties = %serde_json::Value::Object(view.properties.clone()),
            "console: page"
        );
        Ok(())
    }

    async fn identify(&self, identity: &Identity) -> Result<(), PluginError> {
        if !self.enabled {
            return Ok(());
        }
        tracing::info!(
            user_id = %identity.user_id,
            traits = %serde_json::Value::Object(identity.traits.clone()),
            "console: identify"
        );
        Ok(())
    }
}
