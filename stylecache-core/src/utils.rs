use crate::keys::CacheKey;
use crate::CacheEntry;
use std::collections::HashMap;

/// Finds the `count` least recently used keys in the map.
///
/// This utility function is used by the registry's LRU eviction, both when an
/// insertion overflows the capacity (one key) and when the capacity shrinks
/// (possibly many keys).
///
/// # Arguments
///
/// * `map` - The registry map, holding entries with their recency counters
/// * `count` - How many keys to select
///
/// # Returns
///
/// Up to `count` keys, least recently used first. Fewer are returned if the
/// map is smaller than `count`.
///
/// # Behavior
///
/// - Entries are ordered by recency counter, smallest first
/// - Ties on the recency counter go to the entry inserted first
///   (smaller insertion sequence), so selection is deterministic
///
/// # Performance
///
/// O(n log n) in the number of entries: every entry is scanned and sorted.
/// Registries are bounded to at most a few thousand styles and eviction is
/// rare compared to lookups, so no ordered index is maintained.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use stylecache_core::{CacheEntry, CacheKeyGenerator, StyleDescriptor, StyleHandle};
/// use stylecache_core::utils::find_lru_keys;
///
/// let keys = CacheKeyGenerator::default();
/// let mut map = HashMap::new();
/// for (i, d) in [
///     StyleDescriptor::new().bold(true),
///     StyleDescriptor::new().italic(true),
/// ].into_iter().enumerate() {
///     let handle = StyleHandle::detached(d, &keys).unwrap();
///     map.insert(handle.key().clone(), CacheEntry::new(handle, 10 - i as u64, i as u64));
/// }
///
/// // The italic entry has the smaller recency value
/// let lru = find_lru_keys(&map, 1);
/// assert_eq!(lru[0].as_str(), "F{i}");
/// ```
pub fn find_lru_keys(map: &HashMap<CacheKey, CacheEntry>, count: usize) -> Vec<CacheKey> {
    if count == 0 || map.is_empty() {
        return Vec::new();
    }

    if count == 1 {
        return map
            .iter()
            .min_by_key(|(_, entry)| entry.eviction_rank())
            .map(|(key, _)| key.clone())
            .into_iter()
            .collect();
    }

    let mut ranked: Vec<(&CacheKey, (u64, u64))> = map
        .iter()
        .map(|(key, entry)| (key, entry.eviction_rank()))
        .collect();
    ranked.sort_unstable_by_key(|&(_, rank)| rank);
    ranked
        .into_iter()
        .take(count)
        .map(|(key, _)| key.clone())
        .collect()
}

/// Removes the given keys from the map, returning the removed entries.
///
/// Keys that are not present are skipped.
pub fn remove_keys(
    map: &mut HashMap<CacheKey, CacheEntry>,
    keys: &[CacheKey],
) -> Vec<(CacheKey, CacheEntry)> {
    keys.iter()
        .filter_map(|key| map.remove_entry(key))
        .collect()
}
