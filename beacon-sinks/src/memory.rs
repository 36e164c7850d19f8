//! In-memory sink for tests and inspection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use beacon_core::errors::PluginError;
use beacon_core::event::{AnalyticsEvent, Identity, Operation, PageView};
use beacon_core::traits::{AnalyticsPlugin, Capabilities};

/// Accumulates every delivered operation in memory.
///
/// Primarily intended for testing: hold an `Arc<MemorySink>`, register a
/// clone with the dispatcher, then inspect what arrived. Operations are
/// stored in delivery order behind a mutex.
pub struct MemorySink {
    name: String,
    operations: Mutex<Vec<Operation>>,
    initialized: AtomicBool,
    total: AtomicU64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// A sink with a custom name, for registering several side by side.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Mutex::new(Vec::new()),
            initialized: AtomicBool::new(false),
            total: AtomicU64::new(0),
        }
    }

    /// Take all accumulated operations, leaving the buffer empty.
    pub fn take(&self) -> Vec<Operation> {
        std::mem::take(&mut *self.operations.lock())
    }

    /// Number of operations currently held.
    pub fn len(&self) -> usize {
        self.operations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of held track events, in delivery order.
    pub fn track_names(&self) -> Vec<String> {
        self.operations
            .lock()
            .iter()
            .filter_map(|op| match op {
                Operation::Track(event) => Some(event.name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Total operations delivered since creation, unaffected by `take`.
    pub fn total_delivered(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Whether `initialize` has run.
    pub fn was_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    fn record(&self, op: Operation) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.operations.lock().push(op);
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsPlugin for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        self.initialized.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn track(&self, event: &AnalyticsEvent) -> Result<(), PluginError> {
        self.record(Operation::Track(event.clone()));
        Ok(())
    }

    async fn page(&self, view: &PageView) -> Result<(), PluginError> {
        self.record(Operation::Page(view.clone()));
        Ok(())
    }

    async fn identify(&self, identity: &Identity) -> Result<(), PluginError> {
        self.record(Operation::Identify(identity.clone()));
        Ok(())
    }
}
