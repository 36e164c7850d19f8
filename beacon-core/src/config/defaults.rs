// Single source of truth for all default values.

// --- Validation ---
pub const DEFAULT_STRICT_VALIDATION: bool = false;

// --- Consent ---
pub const DEFAULT_TRACK_GATE: &str = "analytics_storage";
pub const DEFAULT_PAGE_GATE: &str = "analytics_storage";
pub const DEFAULT_IDENTIFY_GATE: &str = "personalization_storage";
pub const DEFAULT_GRANTED_CATEGORIES: &[&str] = &["security_storage"];

// --- Session ---
pub const DEFAULT_SESSION_PROPERTY: &str = "session_id";

// --- Batch ---
pub const DEFAULT_BATCH_MAX_SIZE: usize = 20;
pub const DEFAULT_BATCH_MAX_WAIT_MS: u64 = 2_000; // 2 seconds
