use serde::{Deserialize, Serialize};

use super::defaults;
use crate::consent::ConsentCategory;
use crate::event::OperationKind;

/// Consent middleware configuration.
///
/// Each operation kind is gated on one consent category. The defaults follow
/// the common consent-mode mapping: analytics traffic on `analytics_storage`,
/// identity on `personalization_storage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    /// Categories granted at construction; everything else starts denied.
    pub default_granted: Vec<ConsentCategory>,
    /// Category gating track operations.
    pub track_gate: ConsentCategory,
    /// Category gating page operations.
    pub page_gate: ConsentCategory,
    /// Category gating identify operations.
    pub identify_gate: ConsentCategory,
}

impl ConsentConfig {
    /// The category gating the given operation kind.
    pub fn gate_for(&self, kind: OperationKind) -> &ConsentCategory {
        match kind {
            OperationKind::Track => &self.track_gate,
            OperationKind::Page => &self.page_gate,
            OperationKind::Identify => &self.identify_gate,
        }
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            default_granted: defaults::DEFAULT_GRANTED_CATEGORIES
                .iter()
                .map(|name| ConsentCategory::from(*name))
                .collect(),
            track_gate: ConsentCategory::from(defaults::DEFAULT_TRACK_GATE),
            page_gate: ConsentCategory::from(defaults::DEFAULT_PAGE_GATE),
            identify_gate: ConsentCategory::from(defaults::DEFAULT_IDENTIFY_GATE),
        }
    }
}
