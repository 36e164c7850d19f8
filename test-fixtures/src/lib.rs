//! Shared sample payloads for Beacon tests across crates.

use beacon_core::event::{AnalyticsEvent, Identity, PageView, Properties};
use serde_json::{json, Value};

/// Install a test-writer tracing subscriber, once per process.
///
/// Reads `BEACON_LOG` for the filter, defaulting to `beacon=debug`. Safe to
/// call from every test; later calls are no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("BEACON_LOG")
        .unwrap_or_else(|_| EnvFilter::new("beacon=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Build a property map from key/value pairs.
pub fn props(pairs: &[(&str, Value)]) -> Properties {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// A checkout event with a revenue-shaped property set.
pub fn sample_track() -> AnalyticsEvent {
    AnalyticsEvent::with_properties(
        "checkout_completed",
        props(&[
            ("revenue", json!(49.99)),
            ("currency", json!("USD")),
            ("items", json!(3)),
        ]),
    )
}

/// A pricing page view with a title and a campaign property.
pub fn sample_page() -> PageView {
    PageView::new("/pricing")
        .with_title("Pricing")
        .property("utm_source", "newsletter")
}

/// An identify for a paying user, email and plan traits included.
pub fn sample_identity() -> Identity {
    Identity::new("user-42")
        .with_trait("email", "user42@example.com")
        .with_trait("plan", "pro")
}

/// Events named `evt-0` through `evt-{n-1}`, for order assertions.
pub fn numbered_events(n: usize) -> Vec<AnalyticsEvent> {
    (0..n)
        .map(|i| AnalyticsEvent::new(format!("evt-{i}")))
        .collect()
}
