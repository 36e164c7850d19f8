//! Track batching: accumulate, then flush on size, timer, or drain.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use beacon_core::config::BatchConfig;
use beacon_core::event::{AnalyticsEvent, Operation};
use beacon_core::AnalyticsResult;

use crate::chain::{Disposition, Middleware, Next};

/// Accumulates track events and forwards them downstream in bursts.
///
/// Page and identify operations pass straight through. A buffered track is
/// acknowledged with [`Disposition::Buffered`]; it reaches the plugins when
/// one of three triggers fires:
///
/// - size: the buffer hits `max_size`, flushed within that dispatch call
/// - timer: `max_wait_ms` elapses after the first event of the cycle
/// - drain: the dispatcher's `flush` runs, typically at teardown
///
/// Flushed events travel through the stored continuation one at a time, in
/// insertion order, so downstream stages observe them exactly as callers
/// sent them.
pub struct BatchMiddleware {
    inner: Arc<BatchInner>,
}

struct BatchInner {
    config: BatchConfig,
    state: Mutex<BatchState>,
}

#[derive(Default)]
struct BatchState {
    pending: Vec<AnalyticsEvent>,
    /// Continuation to the stages after this one. Refreshed on every
    /// buffered event; all dispatches through one chain carry the same one.
    downstream: Option<Next>,
    /// Bumped on every flush. An armed timer fires only if its generation
    /// is still current, so a size or drain flush retires it.
    generation: u64,
}

impl BatchMiddleware {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            inner: Arc::new(BatchInner {
                config,
                state: Mutex::new(BatchState::default()),
            }),
        }
    }

    /// Number of currently buffered events.
    pub fn buffered(&self) -> usize {
        self.inner.state.lock().pending.len()
    }

    fn arm_timer(&self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        let wait = Duration::from_millis(self.inner.config.max_wait_ms);
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            inner.flush_now("timer", Some(generation)).await;
        });
    }
}

impl BatchInner {
    /// Snapshot and clear the buffer, retiring any armed timer. With an
    /// expected generation, drains nothing when another flush already
    /// retired that cycle — the check and the drain share one lock hold,
    /// so a stale timer can never grab events buffered after a size flush.
    fn drain(&self, expected: Option<u64>) -> (Vec<AnalyticsEvent>, Option<Next>) {
        let mut state = self.state.lock();
        if expected.is_some_and(|generation| generation != state.generation) {
            return (Vec::new(), None);
        }
        state.generation = state.generation.wrapping_add(1);
        let events = mem::take(&mut state.pending);
        let downstream = state.downstream.clone();
        (events, downstream)
    }

    async fn flush_now(&self, trigger: &str, expected: Option<u64>) {
        let (events, downstream) = self.drain(expected);
        if let Some(next) = downstream {
            Self::forward(events, next, trigger).await;
        }
    }

    /// Forward drained events through `next`, one at a time, in order.
    /// A downstream rejection is logged and does not stop the rest.
    async fn forward(events: Vec<AnalyticsEvent>, next: Next, trigger: &str) {
        if events.is_empty() {
            return;
        }
        tracing::debug!("batch: flushing {} event(s) ({trigger})", events.len());
        for event in events {
            if let Err(e) = next.clone().run(Operation::Track(event)).await {
                tracing::warn!("batch: downstream rejected flushed event: {e}");
            }
        }
    }
}

#[async_trait]
impl Middleware for BatchMiddleware {
    fn name(&self) -> &str {
        "batch"
    }

    async fn handle(&self, op: Operation, next: Next) -> AnalyticsResult<Disposition> {
        let event = match op {
            Operation::Track(event) => event,
            other => return next.run(other).await,
        };

        let size_reached = {
            let mut state = self.inner.state.lock();
            state.pending.push(event);
            state.downstream = Some(next);
            if state.pending.len() == 1 {
                self.arm_timer(state.generation);
            }
            state.pending.len() >= self.inner.config.max_size
        };

        if size_reached {
            self.inner.flush_now("size", None).await;
        }
        Ok(Disposition::Buffered)
    }

    async fn flush(&self, next: Next) -> AnalyticsResult<()> {
        let (events, _) = self.inner.drain(None);
        BatchInner::forward(events, next, "drain").await;
        Ok(())
    }
}
