use crate::config::RegistryConfig;
use crate::descriptor::StyleDescriptor;
use crate::error::{Result, StyleCacheError};
use crate::factory::StyleFactory;
use crate::handle::StyleHandle;
use crate::keys::{CacheKey, CacheKeyGenerator};
use crate::stats::{CacheStats, StatsSnapshot};
use crate::utils::{find_lru_keys, remove_keys};
use crate::CacheEntry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A thread-safe registry mapping style descriptors to shared handles.
///
/// The registry guarantees at most one materialization per distinct cache
/// key while the key is cached: every caller asking for an equal descriptor
/// receives the same [`StyleHandle`] instance. The map is bounded by a
/// capacity (0 for unbounded) and evicts least-recently-used entries when it
/// overflows.
///
/// The registry is an ordinary value. Build one per document (or share one
/// behind an `Arc`) and pass it to whatever resolves styles.
///
/// # Eviction Behavior
///
/// Every hit and every insertion ticks a logical clock and stamps the entry
/// with it. When an insertion pushes the map over capacity, or the capacity is
/// lowered, the entries with the smallest stamps are removed; equal stamps are
/// resolved in favor of evicting the earlier insertion. Evicted handles stay
/// valid for whoever already holds them.
///
/// # Thread Safety
///
/// The map lives behind a `parking_lot::RwLock`:
/// 1. **Read lock** to probe for the key. On a hit the lock is released and a
///    short write section stamps the entry's recency and counts the hit.
/// 2. **Write lock** on a miss. The key is probed again, since another thread
///    may have inserted it in the meantime; if it is still missing the factory
///    is called, the handle inserted, and any overflow evicted, all before the
///    lock is released.
///
/// Because the factory runs under the write lock, concurrent requests for the
/// same new descriptor materialize it exactly once. Statistics are only
/// updated inside write sections, so a [`stats`](StyleRegistry::stats)
/// snapshot always agrees with the map.
///
/// # Examples
///
/// ```
/// use stylecache_core::{MaterializeError, StyleDescriptor, StyleId, StyleRegistry};
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let next = AtomicU64::new(1);
/// let registry = StyleRegistry::new(move |_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
///     Ok(StyleId::new(next.fetch_add(1, Ordering::SeqCst)))
/// });
///
/// let a = registry.get_or_create(&StyleDescriptor::new().bold(true).font_size(12)).unwrap();
/// let b = registry.get_or_create(&StyleDescriptor::new().bold(true).font_size(12)).unwrap();
///
/// assert!(a.same_instance(&b));
/// let stats = registry.stats();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// ```
pub struct StyleRegistry {
    factory: Arc<dyn StyleFactory>,
    keys: CacheKeyGenerator,
    state: RwLock<RegistryState>,
    stats: CacheStats,
}

struct RegistryState {
    map: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    clock: u64,
    sequence: u64,
}

impl RegistryState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Evicts least-recently-used entries until the map fits the capacity.
    fn evict_overflow(&mut self) -> Vec<(CacheKey, CacheEntry)> {
        if self.capacity == 0 || self.map.len() <= self.capacity {
            return Vec::new();
        }
        let excess = self.map.len() - self.capacity;
        let victims = find_lru_keys(&self.map, excess);
        remove_keys(&mut self.map, &victims)
    }
}

impl StyleRegistry {
    /// Creates a registry with the default configuration.
    pub fn new<F: StyleFactory + 'static>(factory: F) -> Self {
        Self::with_config(factory, RegistryConfig::default())
    }

    pub fn with_config<F: StyleFactory + 'static>(factory: F, config: RegistryConfig) -> Self {
        Self::from_shared(Arc::new(factory), config)
    }

    /// Creates a registry around a factory that is also used elsewhere.
    pub fn from_shared(factory: Arc<dyn StyleFactory>, config: RegistryConfig) -> Self {
        Self {
            factory,
            keys: CacheKeyGenerator::new(config.hash_threshold),
            state: RwLock::new(RegistryState {
                map: HashMap::new(),
                capacity: config.capacity,
                clock: 0,
                sequence: 0,
            }),
            stats: CacheStats::new(),
        }
    }

    /// Returns the shared handle for `descriptor`, materializing it on first use.
    ///
    /// # Errors
    ///
    /// * [`StyleCacheError::KeyGeneration`] if the descriptor is malformed
    /// * [`StyleCacheError::Materialization`] if the factory rejects it; nothing
    ///   is cached, so the next request for the same descriptor tries again
    pub fn get_or_create(&self, descriptor: &StyleDescriptor) -> Result<StyleHandle> {
        let key = self.keys.key(descriptor)?;

        let cached = {
            let state = self.state.read();
            state.map.get(&key).map(|entry| entry.handle.clone())
        }; // Read lock released here

        if let Some(found) = cached {
            return Ok(self.complete_hit(&key, found));
        }

        let mut state = self.state.write();

        let now = state.tick();
        if let Some(entry) = state.map.get_mut(&key) {
            entry.touch(now);
            self.stats.record_hit();
            trace!(key = %key, "style cache hit after re-check");
            return Ok(entry.handle.clone());
        }

        self.stats.record_miss();
        debug!(key = %key, "style cache miss, materializing");

        let id = match self.factory.materialize(descriptor) {
            Ok(id) => id,
            Err(source) => {
                self.stats.record_failure();
                warn!(key = %key, error = %source, "style materialization failed");
                return Err(StyleCacheError::Materialization {
                    key: key.to_string(),
                    source,
                });
            }
        };

        let handle = StyleHandle::materialized(key.clone(), descriptor.clone(), id);
        let sequence = state.sequence;
        state.sequence += 1;
        state
            .map
            .insert(key, CacheEntry::new(handle.clone(), now, sequence));
        self.stats.record_created();

        let evicted = state.evict_overflow();
        self.record_evictions(&evicted);

        Ok(handle)
    }

    /// Sets the maximum number of live entries; 0 means unbounded.
    ///
    /// Lowering the capacity evicts the least recently used excess entries
    /// immediately. Raising it only moves the bound.
    ///
    /// # Errors
    ///
    /// [`StyleCacheError::CapacityConfiguration`] for a negative (or otherwise
    /// unrepresentable) capacity; the current capacity is left unchanged.
    pub fn set_capacity(&self, capacity: i64) -> Result<()> {
        let capacity = usize::try_from(capacity)
            .map_err(|_| StyleCacheError::CapacityConfiguration { requested: capacity })?;

        let mut state = self.state.write();
        let previous = state.capacity;
        state.capacity = capacity;
        debug!(previous, capacity, "style registry capacity changed");

        let evicted = state.evict_overflow();
        self.record_evictions(&evicted);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.state.read().capacity
    }

    /// Returns a snapshot of the usage statistics.
    pub fn stats(&self) -> StatsSnapshot {
        let state = self.state.read();
        self.stats.snapshot(state.map.len())
    }

    /// Drops every entry and resets all counters.
    ///
    /// Handles already handed out remain usable.
    pub fn clear(&self) {
        let mut state = self.state.write();
        let dropped = state.map.len();
        state.map.clear();
        state.clock = 0;
        state.sequence = 0;
        self.stats.reset();
        info!(dropped, "style registry cleared");
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.state.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Checks whether `descriptor` is cached, without counting a request or
    /// touching its recency.
    pub fn contains(&self, descriptor: &StyleDescriptor) -> bool {
        match self.keys.key(descriptor) {
            Ok(key) => self.state.read().map.contains_key(&key),
            Err(_) => false,
        }
    }

    /// Live keys, least recently used first.
    pub fn keys_by_recency(&self) -> Vec<CacheKey> {
        let state = self.state.read();
        find_lru_keys(&state.map, state.map.len())
    }

    /// The key generator this registry derives keys with.
    pub fn key_generator(&self) -> &CacheKeyGenerator {
        &self.keys
    }

    /// Current configuration, reflecting any capacity change.
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig {
            capacity: self.capacity(),
            hash_threshold: self.keys.hash_threshold(),
        }
    }

    /// Write section of a read-probe hit: stamps recency and counts the hit.
    ///
    /// The key may have been evicted, or evicted and re-inserted, since the
    /// read probe. The live entry wins over `found` when there is one.
    fn complete_hit(&self, key: &CacheKey, found: StyleHandle) -> StyleHandle {
        let mut state = self.state.write();
        let now = state.tick();
        let handle = match state.map.get_mut(key) {
            Some(entry) => {
                entry.touch(now);
                entry.handle.clone()
            }
            None => found,
        };
        self.stats.record_hit();
        trace!(key = %key, "style cache hit");
        handle
    }

    fn record_evictions(&self, evicted: &[(CacheKey, CacheEntry)]) {
        if evicted.is_empty() {
            return;
        }
        self.stats.record_evictions(evicted.len() as u64);
        for (key, entry) in evicted {
            debug!(key = %key, recency = entry.recency, "evicted style");
        }
    }
}

impl fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("StyleRegistry")
            .field("size", &state.map.len())
            .field("capacity", &state.capacity)
            .field("hash_threshold", &self.keys.hash_threshold())
            .finish_non_exhaustive()
    }
}
