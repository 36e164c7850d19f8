//! Property tests: privacy hash determinism, sensitive-value absence, and
//! batch order preservation.

use std::future::Future;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use beacon_core::config::{BatchConfig, PrivacyAction, PrivacyConfig};
use beacon_core::event::{AnalyticsEvent, Operation};
use beacon_pipeline::middleware::privacy::hash_property_value;
use beacon_pipeline::middleware::{BatchMiddleware, PrivacyMiddleware};
use beacon_pipeline::AnalyticsDispatcher;
use beacon_sinks::MemorySink;

/// Single-threaded runtime per case; proptest closures are not async.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    /// Hashing is deterministic and always yields 64 lowercase hex chars.
    #[test]
    fn hash_is_deterministic_hex(value in "\\PC{0,64}") {
        let first = hash_property_value(&json!(value.clone()));
        let second = hash_property_value(&json!(value));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// A hashed sensitive value never reaches the sink in raw form.
    #[test]
    fn raw_sensitive_value_never_reaches_plugins(value in "[a-zA-Z0-9@.]{1,40}") {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = AnalyticsDispatcher::builder()
            .middleware(Arc::new(PrivacyMiddleware::new(PrivacyConfig {
                sensitive_fields: vec!["secret".to_string()],
                action: PrivacyAction::Hash,
            })))
            .plugin(sink.clone())
            .build()
            .unwrap();

        block_on(async {
            dispatcher
                .track(AnalyticsEvent::new("probe").property("secret", value.clone()))
                .await
                .unwrap();
        });

        let ops = sink.take();
        prop_assert_eq!(ops.len(), 1);
        let delivered = match &ops[0] {
            Operation::Track(event) => event,
            _ => unreachable!(),
        };
        let scrubbed = delivered.properties["secret"].as_str().unwrap();
        prop_assert_ne!(scrubbed, value.as_str());
        let expected_hash = hash_property_value(&json!(value));
        prop_assert_eq!(scrubbed, expected_hash.as_str());
    }

    /// Redaction removes the field for any value shape.
    #[test]
    fn redaction_removes_the_field(value in prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "\\PC{0,20}".prop_map(|s| json!(s)),
    ]) {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = AnalyticsDispatcher::builder()
            .middleware(Arc::new(PrivacyMiddleware::new(PrivacyConfig {
                sensitive_fields: vec!["secret".to_string()],
                action: PrivacyAction::Redact,
            })))
            .plugin(sink.clone())
            .build()
            .unwrap();

        block_on(async {
            dispatcher
                .track(AnalyticsEvent::new("probe").property("secret", value))
                .await
                .unwrap();
        });

        let ops = sink.take();
        prop_assert!(!ops[0].properties().contains_key("secret"));
    }

    /// A size-triggered flush forwards all buffered events in insertion
    /// order, regardless of batch size.
    #[test]
    fn batch_flush_preserves_insertion_order(n in 1usize..20) {
        let sink = Arc::new(MemorySink::new());
        let batch = Arc::new(BatchMiddleware::new(BatchConfig {
            max_size: n,
            max_wait_ms: 3_600_000,
        }));
        let dispatcher = AnalyticsDispatcher::builder()
            .middleware(batch.clone())
            .plugin(sink.clone())
            .build()
            .unwrap();

        block_on(async {
            for event in test_fixtures::numbered_events(n) {
                dispatcher.track(event).await.unwrap();
            }
        });

        let expected: Vec<String> = (0..n).map(|i| format!("evt-{i}")).collect();
        prop_assert_eq!(sink.track_names(), expected);
        prop_assert_eq!(batch.buffered(), 0);
    }
}
