use std::sync::atomic::{AtomicU64, Ordering};

/// Usage counters for a [`StyleRegistry`](crate::StyleRegistry).
///
/// This structure tracks registry access patterns using atomic operations for
/// thread-safe statistics collection with minimal overhead.
///
/// # Thread Safety
///
/// All operations use `Relaxed` ordering. The registry only bumps the
/// miss/creation/eviction counters while holding its write lock, so a
/// [`StatsSnapshot`] taken under that lock is consistent with the map.
///
/// # Examples
///
/// ```
/// use stylecache_core::CacheStats;
///
/// let stats = CacheStats::new();
///
/// stats.record_hit();
/// stats.record_hit();
/// stats.record_miss();
///
/// assert_eq!(stats.hits(), 2);
/// assert_eq!(stats.misses(), 1);
/// assert_eq!(stats.total_accesses(), 3);
/// assert!((stats.hit_rate() - 0.6666).abs() < 0.001);
/// ```
#[derive(Debug)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    created: AtomicU64,
    evictions: AtomicU64,
    failures: AtomicU64,
}

impl CacheStats {
    /// Creates a new `CacheStats` instance with zero counters.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            created: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Records a request served from the cache.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a request that did not find its key.
    ///
    /// Counted whether or not the following materialization succeeds.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a new handle created from a successful materialization.
    #[inline]
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` entries removed by the eviction policy.
    #[inline]
    pub fn record_evictions(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a descriptor rejected by the document engine.
    #[inline]
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total handles ever created, including ones since evicted.
    #[inline]
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Returns the total number of requests (hits + misses).
    #[inline]
    pub fn total_accesses(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Calculates the hit rate as a fraction (0.0 to 1.0).
    ///
    /// Returns 0.0 if there have been no accesses.
    ///
    /// # Examples
    ///
    /// ```
    /// use stylecache_core::CacheStats;
    ///
    /// let stats = CacheStats::new();
    /// assert_eq!(stats.hit_rate(), 0.0);
    ///
    /// stats.record_hit();
    /// stats.record_miss();
    /// assert_eq!(stats.hit_rate(), 0.5);
    /// ```
    #[inline]
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits(), self.misses())
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.created.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }

    /// Copies the counters into a plain snapshot.
    ///
    /// `unique_live_styles` is supplied by the caller since only the registry
    /// knows its map size.
    pub fn snapshot(&self, unique_live_styles: usize) -> StatsSnapshot {
        StatsSnapshot {
            total_styles_created: self.created(),
            hits: self.hits(),
            misses: self.misses(),
            unique_live_styles,
            evictions: self.evictions(),
            failed_materializations: self.failures(),
        }
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CacheStats {
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
            created: AtomicU64::new(self.created()),
            evictions: AtomicU64::new(self.evictions()),
            failures: AtomicU64::new(self.failures()),
        }
    }
}

/// Point-in-time view of a registry's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Handles ever created since the last `clear()`
    pub total_styles_created: u64,
    pub hits: u64,
    pub misses: u64,
    /// Entries currently in the map
    pub unique_live_styles: usize,
    pub evictions: u64,
    pub failed_materializations: u64,
}

impl StatsSnapshot {
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / (hits + misses)`, or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// `misses / (hits + misses)`, or 0.0 before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.total_requests() == 0 {
            0.0
        } else {
            1.0 - self.hit_rate()
        }
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
