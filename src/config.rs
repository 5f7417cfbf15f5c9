//! Response cache configuration.

use serde::{Deserialize, Serialize};

/// Default maximum number of entries held across all tenants.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default entry time-to-live: 7 days, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Cache tuning knobs, deserializable from the application config file.
///
/// Both fields default when absent, so `{}` is a valid config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entry count before LRU eviction kicks in.
    pub max_entries: usize,
    /// Entry time-to-live in seconds, checked lazily at lookup time.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}
