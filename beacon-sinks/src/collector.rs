//! HTTP collector sink: enveloped JSON POSTs to a remote endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beacon_core::constants::VERSION;
use beacon_core::errors::{ConfigError, PluginError};
use beacon_core::event::{AnalyticsEvent, Identity, Operation, PageView};
use beacon_core::traits::{AnalyticsPlugin, Capabilities};

/// Current envelope version.
pub const ENVELOPE_VERSION: &str = "1.0";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Collector endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Absolute URL operations are POSTed to.
    pub endpoint: String,
    /// Write key identifying the sending workspace.
    pub write_key: String,
    /// Per-request timeout (ms).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Envelope wrapping every collector request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Envelope version for forward compatibility.
    pub version: String,
    /// Unique message id for tracing and dedup.
    pub message_id: String,
    /// When this envelope was built, integer milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub sent_at: DateTime<Utc>,
    /// Write key identifying the sender.
    pub write_key: String,
    /// Sending library, `beacon/<version>`.
    pub library: String,
    /// The wrapped operation, tagged with its kind.
    pub payload: Operation,
}

/// Ships operations to a remote collector as enveloped JSON.
///
/// One POST per operation. Transport failures and non-2xx responses surface
/// as [`PluginError`]s, which the dispatcher logs and counts without
/// disturbing other plugins.
pub struct CollectorSink {
    config: CollectorConfig,
    client: reqwest::Client,
}

impl CollectorSink {
    pub fn new(config: CollectorConfig) -> Result<Self, ConfigError> {
        if config.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "collector.endpoint".to_string(),
            });
        }
        if config.write_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "collector.write_key".to_string(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "collector".to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    /// Wrap one operation in a fresh envelope.
    pub fn envelope(&self, op: &Operation) -> Envelope {
        Envelope {
            version: ENVELOPE_VERSION.to_string(),
            message_id: Uuid::new_v4().to_string(),
            sent_at: Utc::now(),
            write_key: self.config.write_key.clone(),
            library: format!("beacon/{VERSION}"),
            payload: op.clone(),
        }
    }

    async fn send(&self, op: &Operation) -> Result<(), PluginError> {
        let envelope = self.envelope(op);
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| PluginError::Transport {
                reason: format!("collector request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PluginError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsPlugin for CollectorSink {
    fn name(&self) -> &str {
        "collector"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        tracing::info!("collector: ready, endpoint {}", self.config.endpoint);
        Ok(())
    }

    async fn track(&self, event: &AnalyticsEvent) -> Result<(), PluginError> {
        self.send(&Operation::Track(event.clone())).await
    }

    async fn page(&self, view: &PageView) -> Result<(), PluginError> {
        self.send(&Operation::Page(view.clone())).await
    }

    async fn identify(&self, identity: &Identity) -> Result<(), PluginError> {
        self.send(&Operation::Identify(identity.clone())).await
    }
}
