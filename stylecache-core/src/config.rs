use crate::keys::DEFAULT_HASH_THRESHOLD;

/// Default maximum number of live styles in a registry.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Registry configuration.
///
/// # Examples
///
/// ```
/// use stylecache_core::RegistryConfig;
///
/// let config = RegistryConfig::default().with_capacity(256);
/// assert_eq!(config.capacity, 256);
///
/// // No eviction at all
/// assert_eq!(RegistryConfig::unbounded().capacity, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum live entries; 0 means unbounded
    pub capacity: usize,
    /// Canonical keys at least this long are replaced by their SHA-256 digest
    pub hash_threshold: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hash_threshold: DEFAULT_HASH_THRESHOLD,
        }
    }
}

impl RegistryConfig {
    /// A registry that never evicts.
    pub fn unbounded() -> Self {
        Self {
            capacity: 0,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_hash_threshold(mut self, threshold: usize) -> Self {
        self.hash_threshold = threshold;
        self
    }
}
