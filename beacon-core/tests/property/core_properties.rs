//! Property tests for the core payload and consent types.

use proptest::prelude::*;
use serde_json::json;

use beacon_core::consent::{ConsentCategory, ConsentState, ConsentStatus};
use beacon_core::event::{AnalyticsEvent, Operation};

proptest! {
    /// Any snake_case name survives the category round trip, whether it
    /// maps to a well-known variant or to `Custom`.
    #[test]
    fn category_name_round_trips(name in "[a-z][a-z_]{0,30}") {
        let category = ConsentCategory::from(name.as_str());
        prop_assert_eq!(category.as_str(), name.as_str());
        prop_assert_eq!(ConsentCategory::from(category.as_str()), category.clone());

        let serialized = serde_json::to_string(&category).unwrap();
        let back: ConsentCategory = serde_json::from_str(&serialized).unwrap();
        prop_assert_eq!(back, category);
    }

    /// The wire form keeps name, properties, and millisecond timestamps.
    #[test]
    fn track_operation_wire_round_trips(
        name in "[a-zA-Z0-9_]{1,32}",
        seats in any::<u32>(),
    ) {
        let event = AnalyticsEvent::new(name.clone()).property("seats", seats);
        let sent = Operation::Track(event.clone());
        let value = serde_json::to_value(&sent).unwrap();
        prop_assert_eq!(&value["type"], &json!("track"));

        let received: Operation = serde_json::from_value(value).unwrap();
        match received {
            Operation::Track(back) => {
                prop_assert_eq!(back.name, name);
                prop_assert_eq!(&back.properties["seats"], &json!(seats));
                prop_assert_eq!(
                    back.timestamp.timestamp_millis(),
                    event.timestamp.timestamp_millis()
                );
            }
            other => prop_assert!(false, "expected track, got {:?}", other.kind()),
        }
    }

    /// Applying the same update any number of times leaves the state as a
    /// single application would.
    #[test]
    fn consent_apply_is_idempotent(
        granted in any::<bool>(),
        repeats in 1usize..5,
    ) {
        let status = if granted { ConsentStatus::Granted } else { ConsentStatus::Denied };
        let state = ConsentState::new();
        state.apply([(ConsentCategory::AnalyticsStorage, status)]);
        let reference = state.snapshot();

        for _ in 0..repeats {
            state.apply([(ConsentCategory::AnalyticsStorage, status)]);
        }
        prop_assert_eq!(state.snapshot(), reference);
        prop_assert_eq!(state.status(&ConsentCategory::AnalyticsStorage), status);
    }
}
