//! Extension-point traits implemented outside this crate.

pub mod plugin;
pub mod schema;

pub use plugin::{AnalyticsPlugin, Capabilities};
pub use schema::SchemaCheck;
