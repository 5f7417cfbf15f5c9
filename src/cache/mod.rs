//! Tenant-scoped response caching with TTL expiry and LRU eviction.

pub mod response_cache;
pub mod store;

pub use response_cache::{CacheStats, NormalizedResponseCache};
pub use store::{system_clock, Clock};
