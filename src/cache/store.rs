//! Bounded in-memory store with TTL expiry and LRU eviction.
//!
//! Expiry is lazy: an entry's age is checked when it is read, never by a
//! background sweep. Recency is tracked with a monotonic access sequence
//! rather than wall-clock stamps, so eviction order stays deterministic even
//! when many entries are touched within the same second.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Injectable time source returning Unix seconds.
///
/// Production uses [`system_clock`]; tests install a closure over a counter
/// so TTL expiry can be simulated without sleeping.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Wall-clock seconds since the Unix epoch.
pub fn system_clock() -> Clock {
    Arc::new(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    })
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    /// Unix timestamp when the entry was inserted; drives TTL only.
    inserted_at: u64,
    /// Monotonic access stamp; drives LRU only.
    touched_at: u64,
}

/// Capacity- and TTL-bounded key→value store.
///
/// Not synchronized; the owning cache wraps it in a mutex.
pub struct BoundedStore<V> {
    entries: HashMap<String, Entry<V>>,
    max_entries: usize,
    ttl_secs: u64,
    clock: Clock,
    access_seq: u64,
}

impl<V> BoundedStore<V> {
    /// Create a store holding at most `max_entries` entries, each live for
    /// `ttl_secs` after insertion. `max_entries` is clamped to a minimum of 1
    /// so the eviction loop cannot spin forever.
    pub fn new(max_entries: usize, ttl_secs: u64, clock: Clock) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
            ttl_secs,
            clock,
            access_seq: 0,
        }
    }

    /// Look up a live entry, refreshing its recency.
    ///
    /// An entry whose age has reached the TTL is removed and reported absent.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = (self.clock)();
        let expired = self
            .entries
            .get(key)
            .map(|e| now.saturating_sub(e.inserted_at) >= self.ttl_secs)?;
        if expired {
            debug!(key = %key_prefix(key), "cache entry expired, removing");
            self.entries.remove(key);
            return None;
        }
        self.access_seq += 1;
        let entry = self.entries.get_mut(key)?;
        entry.touched_at = self.access_seq;
        Some(&entry.value)
    }

    /// Insert or overwrite an entry, resetting its TTL clock and recency.
    ///
    /// When the key is new and the store is full, expired entries are dropped
    /// first, then least-recently-used entries until there is room.
    pub fn insert(&mut self, key: String, value: V) {
        let now = (self.clock)();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_expired(now);
            while self.entries.len() >= self.max_entries {
                self.evict_lru();
            }
        }
        self.access_seq += 1;
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
                touched_at: self.access_seq,
            },
        );
    }

    /// Current entry count. Approximate: entries past their TTL still count
    /// until the next access notices them.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // -- private helpers ---------------------------------------------------

    fn evict_expired(&mut self, now: u64) {
        let ttl = self.ttl_secs;
        self.entries
            .retain(|_, e| now.saturating_sub(e.inserted_at) < ttl);
    }

    fn evict_lru(&mut self) {
        if let Some(lru_key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.touched_at)
            .map(|(k, _)| k.clone())
        {
            debug!(key = %key_prefix(&lru_key), "evicting LRU cache entry");
            self.entries.remove(&lru_key);
        }
    }
}

/// First eight bytes of a key for log lines, backed off to a char boundary
/// so non-ASCII keys cannot panic the slice.
fn key_prefix(key: &str) -> &str {
    let mut end = 8.min(key.len());
    while end > 0 && !key.is_char_boundary(end) {
        end -= 1;
    }
    &key[..end]
}
