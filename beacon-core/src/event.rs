//! Analytics payload types — the three operation shapes the pipeline carries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form payload attached to events, page views, and identities.
///
/// A JSON object keyed by property name. Middleware may add, rewrite, or
/// remove entries in place as an operation moves down the chain.
pub type Properties = serde_json::Map<String, Value>;

/// A named analytics event with arbitrary properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `"checkout_completed"`.
    pub name: String,
    /// Free-form event properties.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    /// Capture time, wire-encoded as integer milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event with the current timestamp and no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
            timestamp: Utc::now(),
        }
    }

    /// Create an event with the current timestamp and the given properties.
    pub fn with_properties(name: impl Into<String>, properties: Properties) -> Self {
        Self {
            name: name.into(),
            properties,
            timestamp: Utc::now(),
        }
    }

    /// Attach a single property (builder style).
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A page view with a path, optional title, and arbitrary properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Page path, e.g. `"/pricing"`.
    pub path: String,
    /// Optional human-readable page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form view properties.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    /// Capture time, wire-encoded as integer milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl PageView {
    /// Create a page view with the current timestamp.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            properties: Properties::new(),
            timestamp: Utc::now(),
        }
    }

    /// Set the page title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a single property (builder style).
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A user identification carrying a user id and profile traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub user_id: String,
    /// Profile traits, e.g. email or plan. Treated as properties by middleware.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub traits: Properties,
    /// Capture time, wire-encoded as integer milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Identity {
    /// Create an identity with the current timestamp and no traits.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            traits: Properties::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a single trait (builder style).
    pub fn with_trait(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.traits.insert(key.into(), value.into());
        self
    }
}

/// One operation moving through the pipeline.
///
/// Serialized with an internal `"type"` tag so sinks get a self-describing
/// wire shape: `{"type":"track","name":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Track(AnalyticsEvent),
    Page(PageView),
    Identify(Identity),
}

impl Operation {
    /// The kind of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Track(_) => OperationKind::Track,
            Operation::Page(_) => OperationKind::Page,
            Operation::Identify(_) => OperationKind::Identify,
        }
    }

    /// The mutable property map of this operation.
    ///
    /// For identify operations this is the trait map; middleware that
    /// enriches or scrubs properties treats traits the same way.
    pub fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Operation::Track(event) => &mut event.properties,
            Operation::Page(view) => &mut view.properties,
            Operation::Identify(identity) => &mut identity.traits,
        }
    }

    /// The property map of this operation (traits for identify).
    pub fn properties(&self) -> &Properties {
        match self {
            Operation::Track(event) => &event.properties,
            Operation::Page(view) => &view.properties,
            Operation::Identify(identity) => &identity.traits,
        }
    }

    /// Capture time of the underlying payload.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Operation::Track(event) => event.timestamp,
            Operation::Page(view) => view.timestamp,
            Operation::Identify(identity) => identity.timestamp,
        }
    }
}

/// Discriminant for the three operation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Track,
    Page,
    Identify,
}

impl OperationKind {
    /// Stable lowercase name, matching the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Track => "track",
            OperationKind::Page => "page",
            OperationKind::Identify => "identify",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
