use crate::handle::StyleHandle;

/// Internal wrapper that tracks when a handle was last used.
///
/// Used by the registry's LRU eviction. Recency is a logical clock value
/// drawn from the registry, not a wall-clock timestamp: the registry ticks its
/// clock on every hit and every insertion, so larger means more recent.
///
/// # Fields
///
/// * `handle` - The shared style handle
/// * `recency` - Clock value of the last hit or of the insertion
/// * `sequence` - Insertion order, used to break recency ties
///
/// # Examples
///
/// ```
/// use stylecache_core::{CacheEntry, CacheKeyGenerator, StyleDescriptor, StyleHandle};
///
/// let keys = CacheKeyGenerator::default();
/// let handle = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
///
/// let mut entry = CacheEntry::new(handle, 1, 0);
/// entry.touch(5);
/// assert_eq!(entry.recency, 5);
/// ```
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub handle: StyleHandle,
    pub recency: u64,
    pub sequence: u64,
}

impl CacheEntry {
    /// Creates a new entry stamped with the given clock value.
    pub fn new(handle: StyleHandle, recency: u64, sequence: u64) -> Self {
        Self {
            handle,
            recency,
            sequence,
        }
    }

    /// Marks the entry as used at clock value `now`.
    ///
    /// The clock is monotonic, but a hit whose write section was delayed
    /// behind a newer one must not move the entry back in time.
    pub fn touch(&mut self, now: u64) {
        self.recency = self.recency.max(now);
    }

    /// Ordering key for eviction: least recent first, older insertion first.
    pub fn eviction_rank(&self) -> (u64, u64) {
        (self.recency, self.sequence)
    }
}
