//! Terminal fanout: capability-checked delivery to every registered plugin.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinSet;

use beacon_core::errors::{InitFailure, PluginError};
use beacon_core::event::Operation;
use beacon_core::traits::{AnalyticsPlugin, Capabilities};

use crate::chain::Disposition;
use crate::stats::DispatchStats;

/// A registered plugin plus its runtime enabled flag.
///
/// Disabling an entry removes it from delivery and initialization without
/// unregistering it; the flag can be flipped at any time.
pub struct PluginEntry {
    plugin: Arc<dyn AnalyticsPlugin>,
    enabled: AtomicBool,
}

impl PluginEntry {
    pub(crate) fn new(plugin: Arc<dyn AnalyticsPlugin>) -> Self {
        Self {
            plugin,
            enabled: AtomicBool::new(true),
        }
    }

    /// The plugin's unique name.
    pub fn name(&self) -> &str {
        self.plugin.name()
    }

    /// The capabilities the plugin declared.
    pub fn capabilities(&self) -> Capabilities {
        self.plugin.capabilities()
    }

    /// Whether this plugin currently receives operations.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Include or exclude this plugin from delivery.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

/// The terminal stage of every chain: deliver to all capable plugins.
///
/// Plugins are started in registration order but settle concurrently, each on
/// its own task, so one slow endpoint does not hold up the others. A plugin
/// failure (or panic) is logged and counted without touching its siblings.
pub(crate) struct Fanout {
    plugins: Arc<[PluginEntry]>,
    stats: Arc<DispatchStats>,
}

impl Fanout {
    pub(crate) fn new(plugins: Arc<[PluginEntry]>, stats: Arc<DispatchStats>) -> Self {
        Self { plugins, stats }
    }

    /// Deliver one operation to every enabled plugin that declared the
    /// matching capability. Resolves once all targeted plugins have settled.
    pub(crate) async fn deliver(&self, op: Operation) -> Disposition {
        let kind = op.kind();
        let mut tasks = JoinSet::new();
        let mut names: HashMap<tokio::task::Id, &str> = HashMap::new();

        for entry in self.plugins.iter() {
            if !entry.is_enabled() || !entry.capabilities().supports(kind) {
                continue;
            }
            let plugin = Arc::clone(&entry.plugin);
            let op = op.clone();
            let handle = tasks.spawn(async move {
                match &op {
                    Operation::Track(event) => plugin.track(event).await,
                    Operation::Page(view) => plugin.page(view).await,
                    Operation::Identify(identity) => plugin.identify(identity).await,
                }
            });
            names.insert(handle.id(), entry.name());
        }

        let targeted = tasks.len();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_id, Ok(()))) => {}
                Ok((id, Err(e))) => {
                    self.stats.record_plugin_error();
                    let name = names.get(&id).copied().unwrap_or("?");
                    tracing::warn!("dispatch: plugin '{name}' failed to deliver {kind}: {e}");
                }
                Err(join_err) => {
                    self.stats.record_plugin_error();
                    let name = names.get(&join_err.id()).copied().unwrap_or("?");
                    if join_err.is_panic() {
                        tracing::error!("dispatch: plugin '{name}' panicked during {kind} delivery");
                    } else {
                        tracing::warn!("dispatch: plugin '{name}' delivery cancelled");
                    }
                }
            }
        }

        self.stats.record_delivered();
        Disposition::Delivered { plugins: targeted }
    }

    /// Run `initialize` on every enabled plugin that declared the capability.
    /// All plugins are attempted; failures are collected, not short-circuited.
    pub(crate) async fn initialize_all(&self) -> Vec<InitFailure> {
        let mut tasks = JoinSet::new();
        let mut names: HashMap<tokio::task::Id, String> = HashMap::new();

        for entry in self.plugins.iter() {
            if !entry.is_enabled() || !entry.capabilities().initialize {
                continue;
            }
            let plugin = Arc::clone(&entry.plugin);
            let handle = tasks.spawn(async move { plugin.initialize().await });
            names.insert(handle.id(), entry.name().to_string());
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_id, Ok(()))) => {}
                Ok((id, Err(error))) => {
                    self.stats.record_plugin_error();
                    let plugin = names.remove(&id).unwrap_or_default();
                    tracing::warn!("dispatch: plugin '{plugin}' failed to initialize: {error}");
                    failures.push(InitFailure { plugin, error });
                }
                Err(join_err) => {
                    self.stats.record_plugin_error();
                    let plugin = names.remove(&join_err.id()).unwrap_or_default();
                    tracing::error!("dispatch: plugin '{plugin}' panicked during initialization");
                    failures.push(InitFailure {
                        plugin,
                        error: PluginError::InitFailed {
                            reason: "panicked".to_string(),
                        },
                    });
                }
            }
        }
        failures
    }
}
