//! # beacon-core
//!
//! Foundation crate for the Beacon analytics pipeline.
//! Defines all event types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod consent;
pub mod constants;
pub mod errors;
pub mod event;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AnalyticsConfig;
pub use consent::{ConsentCategory, ConsentState, ConsentStatus};
pub use errors::{AnalyticsError, AnalyticsResult};
pub use event::{AnalyticsEvent, Identity, Operation, OperationKind, PageView, Properties};
pub use traits::{AnalyticsPlugin, Capabilities, SchemaCheck};
