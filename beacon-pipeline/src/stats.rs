//! Dispatch counters, kept on relaxed atomics so recording never contends.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared between the dispatcher and its fanout.
#[derive(Debug, Default)]
pub(crate) struct DispatchStats {
    dispatched: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    buffered: AtomicU64,
    plugin_errors: AtomicU64,
}

impl DispatchStats {
    pub(crate) fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_buffered(&self) {
        self.buffered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_plugin_error(&self) {
        self.plugin_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            buffered: self.buffered.load(Ordering::Relaxed),
            plugin_errors: self.plugin_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the dispatch counters.
///
/// Counter semantics:
/// - `dispatched`: operations accepted by a dispatch call.
/// - `delivered`: operations that reached the plugin fanout, including
///   events forwarded later by a batch flush.
/// - `dropped`: operations a middleware stopped during a dispatch call.
/// - `buffered`: operations parked by a buffering middleware at dispatch
///   time; these show up in `delivered` once flushed.
/// - `plugin_errors`: individual plugin delivery or initialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub dispatched: u64,
    pub delivered: u64,
    pub dropped: u64,
    pub buffered: u64,
    pub plugin_errors: u64,
}
