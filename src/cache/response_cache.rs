//! Normalized per-tenant response cache.
//!
//! Sits in front of the model-call path: each incoming chat query is
//! normalized, keyed under its tenant, and probed against a bounded
//! in-process store. A hit skips the expensive call entirely; on a miss the
//! caller performs the real call and writes the answer back via
//! [`NormalizedResponseCache::store`]. Nothing is persisted across restarts.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

use crate::cache::store::{system_clock, BoundedStore, Clock};
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::normalize::normalize;

/// Thread-safe response cache keyed by (tenant, normalized query).
///
/// The payload type is opaque to the cache; `Clone` is required because hits
/// hand back a copy while the entry stays in the store. Two concurrent
/// lookups for the same unseen query may both miss and both store afterwards;
/// the cache does not deduplicate in-flight builds.
pub struct NormalizedResponseCache<V> {
    store: Mutex<BoundedStore<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> NormalizedResponseCache<V> {
    /// Create a cache with the given configuration and the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Create a cache with an explicit time source. Tests use this to drive
    /// TTL expiry without sleeping.
    pub fn with_clock(config: CacheConfig, clock: Clock) -> Self {
        Self {
            store: Mutex::new(BoundedStore::new(config.max_entries, config.ttl_secs, clock)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Build a deterministic cache key: SHA-256 of `(tenant_id, normalized_query)`.
    ///
    /// Uses length-prefixed encoding so no tenant-id format can collide with
    /// another pair (e.g. `tenant="a", query="bc"` vs `tenant="ab", query="c"`).
    pub fn cache_key(tenant_id: &str, normalized_query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update((tenant_id.len() as u64).to_le_bytes());
        hasher.update(tenant_id.as_bytes());
        hasher.update((normalized_query.len() as u64).to_le_bytes());
        hasher.update(normalized_query.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Look up a cached response for a raw query under a tenant.
    ///
    /// Returns `Ok(None)` when the entry is absent or past its TTL; the
    /// caller is expected to take the expensive path and then [`store`] the
    /// result. Counters are the only side effect of a miss.
    ///
    /// [`store`]: NormalizedResponseCache::store
    pub fn lookup(&self, tenant_id: &str, raw_query: &str) -> Result<Option<V>, CacheError> {
        let key = Self::keyed(tenant_id, raw_query)?;
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        match store.get(&key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(tenant = %tenant_id, key = %&key[..8], "response cache hit");
                Ok(Some(value.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Cache a computed response for a raw query under a tenant.
    ///
    /// Idempotent: storing the same (tenant, query) again overwrites the
    /// prior value and resets its TTL clock and recency.
    pub fn store(&self, tenant_id: &str, raw_query: &str, response: V) -> Result<(), CacheError> {
        let key = Self::keyed(tenant_id, raw_query)?;
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        store.insert(key, response);
        Ok(())
    }

    /// Aggregate hit/miss statistics. Counters are monotonic for the process
    /// lifetime; `hit_rate` is 0.0 before the first lookup.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        let entries = self.store.lock().unwrap_or_else(|e| e.into_inner()).len();
        CacheStats {
            entries,
            hits,
            misses,
            hit_rate,
        }
    }

    /// Remove all entries. Hit/miss counters are not reset.
    pub fn clear(&self) {
        self.store.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Current entry count. Entries past their TTL still count until the
    /// next access notices them.
    pub fn len(&self) -> usize {
        self.store.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Return `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn keyed(tenant_id: &str, raw_query: &str) -> Result<String, CacheError> {
        if tenant_id.trim().is_empty() {
            return Err(CacheError::InvalidTenant);
        }
        Ok(Self::cache_key(tenant_id, &normalize(raw_query)))
    }
}

/// Aggregate cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    /// Number of entries currently held.
    pub entries: usize,
    /// Cumulative lookup hits.
    pub hits: u64,
    /// Cumulative lookup misses.
    pub misses: u64,
    /// `hits / (hits + misses)`, 0.0 when no lookups have occurred.
    pub hit_rate: f64,
}
