//! The middleware chain: ordered stages invoked with an explicit continuation.

use std::sync::Arc;

use async_trait::async_trait;

use beacon_core::consent::ConsentCategory;
use beacon_core::event::Operation;
use beacon_core::AnalyticsResult;

use crate::fanout::Fanout;

/// What ultimately happened to a dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The operation reached the fanout and was offered to this many plugins.
    Delivered { plugins: usize },
    /// A middleware stopped the operation.
    Dropped(DropReason),
    /// A buffering middleware holds the operation for later delivery.
    Buffered,
}

/// Why a middleware dropped an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The gating consent category was not granted.
    ConsentDenied { category: ConsentCategory },
    /// A middleware filtered the operation out.
    Filtered { stage: String },
}

/// One stage in the chain.
///
/// A stage receives the operation by value together with the continuation
/// bound to the rest of the chain, and decides what happens:
///
/// - pass through, possibly mutated: `next.run(op).await`
/// - drop: return [`Disposition::Dropped`] without calling `next`
/// - hold: stash `op` and `next` for later, return [`Disposition::Buffered`]
/// - reject: return an error to the caller
///
/// Calling the continuation zero or one times within `handle` are both
/// legal; a buffering stage may invoke its stored continuation any number of
/// times afterwards, once per held operation.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Stage name for logs and introspection.
    fn name(&self) -> &str;

    /// Handle one operation.
    async fn handle(&self, op: Operation, next: Next) -> AnalyticsResult<Disposition>;

    /// Drain any internally held operations through `next`, which is bound
    /// to the stages after this one. Stages that hold nothing do nothing.
    async fn flush(&self, _next: Next) -> AnalyticsResult<()> {
        Ok(())
    }
}

/// The continuation a stage invokes to send an operation onward.
///
/// `Next` is cheap to clone and owns its position in the chain: stage `i`
/// receives a `Next` bound to stage `i + 1`, and the last stage's `Next` is
/// bound to the plugin fanout. Because it is owned and `'static`, a
/// buffering stage can store it and invoke it from a timer task long after
/// the originating dispatch call returned.
#[derive(Clone)]
pub struct Next {
    stages: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    fanout: Arc<Fanout>,
}

impl Next {
    /// Continuation bound to the head of the chain.
    pub(crate) fn head(stages: Arc<[Arc<dyn Middleware>]>, fanout: Arc<Fanout>) -> Self {
        Self::at(stages, 0, fanout)
    }

    /// Continuation bound to the stage at `index` (the fanout when past the end).
    pub(crate) fn at(
        stages: Arc<[Arc<dyn Middleware>]>,
        index: usize,
        fanout: Arc<Fanout>,
    ) -> Self {
        Self {
            stages,
            index,
            fanout,
        }
    }

    /// Run the rest of the chain on `op`.
    pub async fn run(self, op: Operation) -> AnalyticsResult<Disposition> {
        match self.stages.get(self.index).cloned() {
            Some(stage) => {
                let next = Next {
                    stages: self.stages,
                    index: self.index + 1,
                    fanout: self.fanout,
                };
                stage.handle(op, next).await
            }
            None => Ok(self.fanout.deliver(op).await),
        }
    }
}
