//! Dispatcher contract: delivery, plugin isolation, initialization policy,
//! and registry introspection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use beacon_core::config::{DispatcherConfig, InitErrorPolicy};
use beacon_core::errors::{AnalyticsError, ConfigError, PluginError};
use beacon_core::event::{AnalyticsEvent, Operation};
use beacon_core::traits::{AnalyticsPlugin, Capabilities};
use beacon_pipeline::{AnalyticsDispatcher, Disposition};
use beacon_sinks::MemorySink;
use test_fixtures::{init_test_logging, sample_page, sample_track};

/// A sink whose delivery always fails, with an optional failing initialize.
struct FailingSink {
    fail_init: bool,
}

impl FailingSink {
    fn new() -> Self {
        Self { fail_init: false }
    }

    fn failing_init() -> Self {
        Self { fail_init: true }
    }
}

#[async_trait]
impl AnalyticsPlugin for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        if self.fail_init {
            Err(PluginError::InitFailed {
                reason: "endpoint unreachable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    async fn track(&self, _event: &AnalyticsEvent) -> Result<(), PluginError> {
        Err(PluginError::Transport {
            reason: "connection refused".to_string(),
        })
    }
}

/// Counts initializations and track deliveries; declares only those two.
struct CountingSink {
    inits: AtomicU64,
    tracks: AtomicU64,
}

impl CountingSink {
    fn new() -> Self {
        Self {
            inits: AtomicU64::new(0),
            tracks: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl AnalyticsPlugin for CountingSink {
    fn name(&self) -> &str {
        "counting"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            initialize: true,
            track: true,
            page: false,
            identify: false,
        }
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        self.inits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn track(&self, _event: &AnalyticsEvent) -> Result<(), PluginError> {
        self.tracks.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[tokio::test]
async fn empty_chain_delivers_to_single_sink() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(sink.clone())
        .build()
        .unwrap();

    let event = sample_track();
    let disposition = dispatcher.track(event.clone()).await.unwrap();
    assert_eq!(disposition, Disposition::Delivered { plugins: 1 });

    let ops = sink.take();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        Operation::Track(delivered) => {
            assert_eq!(delivered.name, event.name);
            assert_eq!(delivered.properties, event.properties);
        }
        other => panic!("expected track, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn failing_plugin_does_not_affect_siblings_or_caller() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(Arc::new(FailingSink::new()))
        .plugin(sink.clone())
        .build()
        .unwrap();

    let result = dispatcher.track(sample_track()).await;
    assert_eq!(result.unwrap(), Disposition::Delivered { plugins: 2 });

    assert_eq!(sink.len(), 1, "healthy sink still received the event");
    assert_eq!(dispatcher.stats().plugin_errors, 1);
}

#[tokio::test]
async fn capability_filter_skips_undeclared_operations() {
    init_test_logging();
    let counting = Arc::new(CountingSink::new());
    let memory = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(counting.clone())
        .plugin(memory.clone())
        .build()
        .unwrap();

    let disposition = dispatcher.page(sample_page()).await.unwrap();
    // Only the memory sink declares page.
    assert_eq!(disposition, Disposition::Delivered { plugins: 1 });
    assert_eq!(counting.tracks.load(Ordering::Relaxed), 0);
    assert_eq!(memory.len(), 1);

    dispatcher.track(sample_track()).await.unwrap();
    assert_eq!(counting.tracks.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn duplicate_plugin_names_rejected_at_build() {
    let result = AnalyticsDispatcher::builder()
        .plugin(Arc::new(MemorySink::named("dup")))
        .plugin(Arc::new(MemorySink::named("dup")))
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::DuplicatePlugin { name }) if name == "dup"
    ));
}

#[tokio::test]
async fn blank_plugin_name_rejected_at_build() {
    let result = AnalyticsDispatcher::builder()
        .plugin(Arc::new(MemorySink::named("  ")))
        .build();
    assert!(matches!(result, Err(ConfigError::MissingField { .. })));
}

#[tokio::test]
async fn initialize_continue_on_error_keeps_healthy_plugins() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(Arc::new(FailingSink::failing_init()))
        .plugin(sink.clone())
        .build()
        .unwrap();

    dispatcher.initialize().await.unwrap();
    assert!(sink.was_initialized());
}

#[tokio::test]
async fn initialize_fail_fast_reports_every_failure() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .config(DispatcherConfig {
            init_error_policy: InitErrorPolicy::FailFast,
        })
        .plugin(Arc::new(FailingSink::failing_init()))
        .plugin(sink.clone())
        .build()
        .unwrap();

    let err = dispatcher.initialize().await.unwrap_err();
    match err {
        AnalyticsError::Init { failures } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].plugin, "failing");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Every plugin was attempted before the failure was reported.
    assert!(sink.was_initialized());

    // Fail-fast leaves the dispatcher uninitialized, so a retry re-runs.
    assert!(dispatcher.initialize().await.is_err());
}

#[tokio::test]
async fn initialize_runs_once_after_success() {
    init_test_logging();
    let counting = Arc::new(CountingSink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(counting.clone())
        .build()
        .unwrap();

    dispatcher.initialize().await.unwrap();
    dispatcher.initialize().await.unwrap();
    assert_eq!(counting.inits.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn registry_preserves_order_and_toggles_by_name() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(Arc::new(CountingSink::new()))
        .plugin(sink.clone())
        .build()
        .unwrap();

    let names: Vec<_> = dispatcher.plugins().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["counting", "memory"]);
    assert_eq!(dispatcher.plugin_count(), 2);

    assert!(dispatcher.set_plugin_enabled("memory", false));
    dispatcher.track(sample_track()).await.unwrap();
    assert!(sink.is_empty(), "disabled sink must not receive operations");

    assert!(dispatcher.set_plugin_enabled("memory", true));
    dispatcher.track(sample_track()).await.unwrap();
    assert_eq!(sink.len(), 1);

    assert!(!dispatcher.set_plugin_enabled("nope", false));
    assert!(dispatcher.plugin("nope").is_none());
}

#[tokio::test]
async fn caller_supplied_timestamp_survives_delivery() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(sink.clone())
        .build()
        .unwrap();

    let mut event = AnalyticsEvent::new("backfilled");
    event.timestamp = Utc::now() - Duration::hours(2);
    let expected = event.timestamp;

    dispatcher.track(event).await.unwrap();
    let ops = sink.take();
    assert_eq!(ops[0].timestamp(), expected);
}

#[tokio::test]
async fn stats_reflect_dispatch_outcomes() {
    init_test_logging();
    let sink = Arc::new(MemorySink::new());
    let dispatcher = AnalyticsDispatcher::builder()
        .plugin(sink.clone())
        .build()
        .unwrap();

    dispatcher.track(sample_track()).await.unwrap();
    dispatcher.page(sample_page()).await.unwrap();

    let stats = dispatcher.stats();
    assert_eq!(stats.dispatched, 2);
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.dropped, 0);
    assert_eq!(stats.buffered, 0);
    assert_eq!(stats.plugin_errors, 0);
}
