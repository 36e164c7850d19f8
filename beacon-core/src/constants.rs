/// Beacon pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard upper bound on the batch buffer size, regardless of configuration.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Hard upper bound on the batch flush interval (one hour).
pub const MAX_BATCH_WAIT_MS: u64 = 3_600_000;

/// Length of a hashed property value: lowercase blake3 hex.
pub const HASH_HEX_LEN: usize = 64;
