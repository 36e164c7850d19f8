//! Consent categories and the shared runtime consent state.

use std::collections::HashMap;
use std::fmt;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A consent category an operation can be gated on.
///
/// The five well-known categories follow the common consent-mode taxonomy;
/// anything else round-trips as [`ConsentCategory::Custom`]. Serialized as a
/// plain snake_case string either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsentCategory {
    AnalyticsStorage,
    AdStorage,
    FunctionalityStorage,
    PersonalizationStorage,
    SecurityStorage,
    Custom(String),
}

impl ConsentCategory {
    /// Stable snake_case name of this category.
    pub fn as_str(&self) -> &str {
        match self {
            ConsentCategory::AnalyticsStorage => "analytics_storage",
            ConsentCategory::AdStorage => "ad_storage",
            ConsentCategory::FunctionalityStorage => "functionality_storage",
            ConsentCategory::PersonalizationStorage => "personalization_storage",
            ConsentCategory::SecurityStorage => "security_storage",
            ConsentCategory::Custom(name) => name,
        }
    }
}

impl From<&str> for ConsentCategory {
    fn from(name: &str) -> Self {
        match name {
            "analytics_storage" => ConsentCategory::AnalyticsStorage,
            "ad_storage" => ConsentCategory::AdStorage,
            "functionality_storage" => ConsentCategory::FunctionalityStorage,
            "personalization_storage" => ConsentCategory::PersonalizationStorage,
            "security_storage" => ConsentCategory::SecurityStorage,
            other => ConsentCategory::Custom(other.to_string()),
        }
    }
}

impl From<String> for ConsentCategory {
    fn from(name: String) -> Self {
        ConsentCategory::from(name.as_str())
    }
}

impl From<ConsentCategory> for String {
    fn from(category: ConsentCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant state for a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    Granted,
    Denied,
}

impl ConsentStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, ConsentStatus::Granted)
    }
}

/// Shared, concurrently updatable consent state.
///
/// Absent categories are denied. The application holds one [`ConsentState`]
/// behind an `Arc`, hands a clone of that handle to the consent middleware,
/// and updates grants from its consent UI at any time; dispatches observe the
/// state as of the moment they reach the middleware.
#[derive(Debug, Default)]
pub struct ConsentState {
    grants: DashMap<ConsentCategory, ConsentStatus>,
}

impl ConsentState {
    /// All categories denied.
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories denied except the given ones.
    pub fn with_granted(granted: impl IntoIterator<Item = ConsentCategory>) -> Self {
        let state = Self::new();
        for category in granted {
            state.grants.insert(category, ConsentStatus::Granted);
        }
        state
    }

    /// Current status of a category. Absent means denied.
    pub fn status(&self, category: &ConsentCategory) -> ConsentStatus {
        self.grants
            .get(category)
            .map(|entry| *entry.value())
            .unwrap_or(ConsentStatus::Denied)
    }

    /// Whether a category is currently granted.
    pub fn is_granted(&self, category: &ConsentCategory) -> bool {
        self.status(category).is_granted()
    }

    /// Set the status of a single category.
    pub fn set(&self, category: ConsentCategory, status: ConsentStatus) {
        self.grants.insert(category, status);
    }

    /// Apply a partial update. Categories not mentioned keep their state.
    pub fn apply(&self, updates: impl IntoIterator<Item = (ConsentCategory, ConsentStatus)>) {
        for (category, status) in updates {
            self.grants.insert(category, status);
        }
    }

    /// Point-in-time copy of all explicitly set categories.
    pub fn snapshot(&self) -> HashMap<ConsentCategory, ConsentStatus> {
        self.grants
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_category_is_denied() {
        let state = ConsentState::new();
        assert_eq!(
            state.status(&ConsentCategory::AnalyticsStorage),
            ConsentStatus::Denied
        );
        assert!(!state.is_granted(&ConsentCategory::AdStorage));
    }

    #[test]
    fn with_granted_seeds_only_listed_categories() {
        let state = ConsentState::with_granted([
            ConsentCategory::SecurityStorage,
            ConsentCategory::FunctionalityStorage,
        ]);
        assert!(state.is_granted(&ConsentCategory::SecurityStorage));
        assert!(state.is_granted(&ConsentCategory::FunctionalityStorage));
        assert!(!state.is_granted(&ConsentCategory::AnalyticsStorage));
    }

    #[test]
    fn apply_is_partial() {
        let state = ConsentState::with_granted([ConsentCategory::SecurityStorage]);
        state.apply([(ConsentCategory::AnalyticsStorage, ConsentStatus::Granted)]);
        assert!(state.is_granted(&ConsentCategory::SecurityStorage));
        assert!(state.is_granted(&ConsentCategory::AnalyticsStorage));

        state.apply([(ConsentCategory::AnalyticsStorage, ConsentStatus::Denied)]);
        assert!(!state.is_granted(&ConsentCategory::AnalyticsStorage));
        assert!(state.is_granted(&ConsentCategory::SecurityStorage));
    }

    #[test]
    fn repeated_set_to_same_value_changes_nothing() {
        let state = ConsentState::new();
        state.set(ConsentCategory::AnalyticsStorage, ConsentStatus::Granted);
        let first = state.snapshot();
        state.set(ConsentCategory::AnalyticsStorage, ConsentStatus::Granted);
        assert_eq!(state.snapshot(), first);
    }

    #[test]
    fn unknown_names_become_custom_categories() {
        let category = ConsentCategory::from("marketing_emails");
        assert_eq!(
            category,
            ConsentCategory::Custom("marketing_emails".to_string())
        );
        assert_eq!(category.as_str(), "marketing_emails");

        let known = ConsentCategory::from("ad_storage".to_string());
        assert_eq!(known, ConsentCategory::AdStorage);
    }

    #[test]
    fn category_serde_round_trips_as_string() {
        let json = serde_json::to_string(&ConsentCategory::PersonalizationStorage).unwrap();
        assert_eq!(json, "\"personalization_storage\"");
        let back: ConsentCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConsentCategory::PersonalizationStorage);
    }
}
