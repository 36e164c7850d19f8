//! # beacon-sinks
//!
//! Reference plugins for the Beacon pipeline: a log-line console sink, an
//! in-memory sink for tests and inspection, and an HTTP collector that
//! ships enveloped JSON to a remote endpoint.

pub mod collector;
pub mod console;
pub mod memory;

pub use collector::{CollectorConfig, CollectorSink, Envelope, ENVELOPE_VERSION};
pub use console::ConsoleSink;
pub use memory::MemorySink;
