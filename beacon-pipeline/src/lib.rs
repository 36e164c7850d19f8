//! # beacon-pipeline
//!
//! The composition engine: an [`AnalyticsDispatcher`] fronting an ordered
//! middleware chain that terminates in a capability-checked plugin fanout.
//!
//! Every dispatched operation walks the chain stage by stage; each stage
//! holds an explicit [`Next`] continuation and decides whether the operation
//! continues, mutates, drops, or waits in a buffer. Whatever survives is
//! fanned out to all registered plugins that declared the matching
//! capability.

pub mod chain;
pub mod dispatcher;
pub mod fanout;
pub mod middleware;
pub mod stats;

pub use chain::{Disposition, DropReason, Middleware, Next};
pub use dispatcher::{AnalyticsDispatcher, DispatcherBuilder};
pub use fanout::PluginEntry;
pub use stats::StatsSnapshot;
