//! The dispatch surface: builder, operation entry points, plugin registry.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use beacon_core::config::{DispatcherConfig, InitErrorPolicy};
use beacon_core::errors::ConfigError;
use beacon_core::event::{AnalyticsEvent, Identity, Operation, PageView};
use beacon_core::traits::AnalyticsPlugin;
use beacon_core::{AnalyticsError, AnalyticsResult};

use crate::chain::{Disposition, Middleware, Next};
use crate::fanout::{Fanout, PluginEntry};
use crate::stats::{DispatchStats, StatsSnapshot};

/// The entry point of the pipeline.
///
/// Owns the ordered middleware chain and the plugin registry. Applications
/// construct one via [`AnalyticsDispatcher::builder`], hold it wherever they
/// keep long-lived services, and share it freely: every method takes `&self`
/// and the dispatcher is `Send + Sync`. There is no global instance.
pub struct AnalyticsDispatcher {
    stages: Arc<[Arc<dyn Middleware>]>,
    plugins: Arc<[PluginEntry]>,
    fanout: Arc<Fanout>,
    config: DispatcherConfig,
    stats: Arc<DispatchStats>,
    initialized: AtomicBool,
}

impl AnalyticsDispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Run every capable plugin's initialization hook, once.
    ///
    /// All plugins are attempted regardless of individual failures. What a
    /// failure means depends on the configured policy: `ContinueOnError`
    /// logs and keeps the healthy plugins; `FailFast` returns the collected
    /// failures and leaves the dispatcher uninitialized so the call can be
    /// retried. Subsequent calls after a successful pass are no-ops.
    pub async fn initialize(&self) -> AnalyticsResult<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("dispatch: already initialized");
            return Ok(());
        }

        let failures = self.fanout.initialize_all().await;
        if failures.is_empty() {
            tracing::info!("dispatch: initialized {} plugin(s)", self.plugins.len());
            return Ok(());
        }

        match self.config.init_error_policy {
            InitErrorPolicy::ContinueOnError => {
                tracing::warn!(
                    "dispatch: {} plugin(s) failed to initialize, continuing",
                    failures.len()
                );
                Ok(())
            }
            InitErrorPolicy::FailFast => {
                self.initialized.store(false, Ordering::SeqCst);
                Err(AnalyticsError::Init { failures })
            }
        }
    }

    /// Dispatch a track event.
    pub async fn track(&self, event: AnalyticsEvent) -> AnalyticsResult<Disposition> {
        self.dispatch(Operation::Track(event)).await
    }

    /// Dispatch a page view.
    pub async fn page(&self, view: PageView) -> AnalyticsResult<Disposition> {
        self.dispatch(Operation::Page(view)).await
    }

    /// Dispatch an identity.
    pub async fn identify(&self, identity: Identity) -> AnalyticsResult<Disposition> {
        self.dispatch(Operation::Identify(identity)).await
    }

    /// Send one operation through the chain and report where it ended up.
    ///
    /// The returned future resolves only after every targeted plugin has
    /// settled (or, for buffered operations, once the buffering stage has
    /// accepted the event).
    pub async fn dispatch(&self, op: Operation) -> AnalyticsResult<Disposition> {
        self.stats.record_dispatched();
        let kind = op.kind();

        let result = Next::head(Arc::clone(&self.stages), Arc::clone(&self.fanout))
            .run(op)
            .await;

        match &result {
            Ok(Disposition::Delivered { plugins }) => {
                tracing::debug!("dispatch: {kind} delivered to {plugins} plugin(s)");
            }
            Ok(Disposition::Dropped(reason)) => {
                self.stats.record_dropped();
                tracing::debug!("dispatch: {kind} dropped ({reason:?})");
            }
            Ok(Disposition::Buffered) => {
                self.stats.record_buffered();
            }
            Err(e) => {
                tracing::debug!("dispatch: {kind} rejected: {e}");
            }
        }
        result
    }

    /// Drain every buffering stage, in chain order.
    ///
    /// Each stage's held operations travel through the stages after it, so
    /// drained events still hit downstream scrubbing and the fanout. A
    /// failing stage is logged and does not stop the rest of the drain.
    pub async fn flush(&self) -> AnalyticsResult<()> {
        for (index, stage) in self.stages.iter().enumerate() {
            let next = Next::at(
                Arc::clone(&self.stages),
                index + 1,
                Arc::clone(&self.fanout),
            );
            if let Err(e) = stage.flush(next).await {
                tracing::warn!("dispatch: flush of stage '{}' failed: {e}", stage.name());
            }
        }
        Ok(())
    }

    /// All registered plugins, in registration order.
    pub fn plugins(&self) -> &[PluginEntry] {
        &self.plugins
    }

    /// Look up a plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|entry| entry.name() == name)
    }

    /// Enable or disable a plugin at runtime. Returns false when no plugin
    /// has that name.
    pub fn set_plugin_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.plugin(name) {
            Some(entry) => {
                entry.set_enabled(enabled);
                tracing::debug!(
                    "dispatch: plugin '{name}' {}",
                    if enabled { "enabled" } else { "disabled" }
                );
                true
            }
            None => false,
        }
    }

    /// Number of registered plugins.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Number of middleware stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Point-in-time copy of the dispatch counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// Builds an [`AnalyticsDispatcher`] from middleware and plugins.
///
/// Middleware run in the order they are added; plugins are delivered to in
/// registration order. Both are fixed at build time, though plugins can be
/// toggled afterwards.
pub struct DispatcherBuilder {
    config: DispatcherConfig,
    stages: Vec<Arc<dyn Middleware>>,
    plugins: Vec<Arc<dyn AnalyticsPlugin>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            config: DispatcherConfig::default(),
            stages: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Dispatcher-level configuration (initialization policy).
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a middleware stage to the chain.
    pub fn middleware(mut self, stage: Arc<dyn Middleware>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Register a plugin. Names must be unique across the registry.
    pub fn plugin(mut self, plugin: Arc<dyn AnalyticsPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn build(self) -> Result<AnalyticsDispatcher, ConfigError> {
        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            let name = plugin.name();
            if name.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "plugin.name".to_string(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicatePlugin {
                    name: name.to_string(),
                });
            }
        }

        let stats = Arc::new(DispatchStats::default());
        let plugins: Arc<[PluginEntry]> = self
            .plugins
            .into_iter()
            .map(PluginEntry::new)
            .collect::<Vec<_>>()
            .into();
        let fanout = Arc::new(Fanout::new(Arc::clone(&plugins), Arc::clone(&stats)));

        Ok(AnalyticsDispatcher {
            stages: self.stages.into(),
            plugins,
            fanout,
            config: self.config,
            stats,
            initialized: AtomicBool::new(false),
        })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
