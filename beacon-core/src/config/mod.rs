//! Configuration system for Beacon.
//! TOML-based, 3-layer resolution: env > application TOML > defaults.

pub mod analytics_config;
pub mod batch_config;
pub mod consent_config;
pub mod defaults;
pub mod dispatch_config;
pub mod privacy_config;
pub mod session_config;
pub mod validation_config;

pub use analytics_config::AnalyticsConfig;
pub use batch_config::BatchConfig;
pub use consent_config::ConsentConfig;
pub use dispatch_config::{DispatcherConfig, InitErrorPolicy};
pub use privacy_config::{PrivacyAction, PrivacyConfig};
pub use session_config::SessionConfig;
pub use validation_config::ValidationConfig;
