use crate::descriptor::StyleDescriptor;
use crate::error::{Result, StyleCacheError};
use crate::factory::{DocumentContext, StyleId};
use crate::keys::{CacheKey, CacheKeyGenerator};
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared, immutable token standing in for a materialized style.
///
/// A handle is a flyweight: the registry creates exactly one per distinct
/// cache key, and every cell using that style holds a clone of it. Cloning is
/// a reference-count bump. The handle owns a private copy of its descriptor,
/// so neither the caller's original descriptor nor the registry can change it
/// afterwards. Evicting a key from the registry only stops the handle from
/// being returned by future lookups; existing clones keep working.
///
/// # Equality
///
/// Two handles are equal when their cache keys are equal. Handles handed out
/// by the same registry for equal descriptors are also the *same instance*,
/// which [`same_instance`](StyleHandle::same_instance) checks directly.
///
/// # Examples
///
/// ```
/// use stylecache_core::{CacheKeyGenerator, StyleDescriptor, StyleHandle};
///
/// let keys = CacheKeyGenerator::default();
/// let a = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
/// let b = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
///
/// assert_eq!(a, b);                // same key
/// assert!(!a.same_instance(&b));   // built separately
/// assert!(a.style_id().is_none()); // not materialized yet
/// ```
#[derive(Clone)]
pub struct StyleHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    key: CacheKey,
    descriptor: StyleDescriptor,
    id: OnceCell<StyleId>,
}

impl StyleHandle {
    /// Builds a materialized handle. Only the registry does this.
    pub(crate) fn materialized(key: CacheKey, descriptor: StyleDescriptor, id: StyleId) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                key,
                descriptor,
                id: OnceCell::with_value(id),
            }),
        }
    }

    /// Builds a handle outside any registry, without an engine identifier.
    ///
    /// The first [`apply`](StyleHandle::apply) registers the style with the
    /// document and remembers the identifier for later calls. Prefer
    /// [`StyleRegistry::get_or_create`](crate::StyleRegistry::get_or_create),
    /// which deduplicates.
    pub fn detached(descriptor: StyleDescriptor, keys: &CacheKeyGenerator) -> Result<Self> {
        let key = keys.key(&descriptor)?;
        Ok(Self {
            inner: Arc::new(HandleInner {
                key,
                descriptor,
                id: OnceCell::new(),
            }),
        })
    }

    /// Returns a copy of the descriptor this handle was created from.
    pub fn descriptor(&self) -> StyleDescriptor {
        self.inner.descriptor.clone()
    }

    pub fn key(&self) -> &CacheKey {
        &self.inner.key
    }

    /// Engine identifier, if the style has been materialized.
    pub fn style_id(&self) -> Option<StyleId> {
        self.inner.id.get().copied()
    }

    /// Binds this style to `target` (e.g. `"B7"`) in the given document.
    ///
    /// Handles from a registry are already materialized and go straight to
    /// [`DocumentContext::bind_style`]. A detached handle is materialized
    /// through `ctx` first; concurrent first calls materialize only once.
    pub fn apply<C>(&self, ctx: &mut C, target: &str) -> Result<()>
    where
        C: DocumentContext + ?Sized,
    {
        let id = *self.inner.id.get_or_try_init(|| {
            tracing::debug!(key = %self.inner.key, "materializing detached style handle");
            ctx.materialize(&self.inner.descriptor)
                .map_err(|source| StyleCacheError::Materialization {
                    key: self.inner.key.to_string(),
                    source,
                })
        })?;

        ctx.bind_style(target, id)
            .map_err(|e| StyleCacheError::Apply {
                target: target.to_string(),
                reason: e.to_string(),
            })
    }

    /// Reference equality: both handles point at the same shared instance.
    pub fn same_instance(&self, other: &StyleHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live clones of this handle (registry included).
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl PartialEq for StyleHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other) || self.inner.key == other.inner.key
    }
}

impl Eq for StyleHandle {}

impl Hash for StyleHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.key.hash(state);
    }
}

impl fmt::Debug for StyleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleHandle")
            .field("key", &self.inner.key)
            .field("id", &self.inner.id.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{MaterializeError, StyleFactory};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Sheet {
        materialized: AtomicUsize,
        bound: HashMap<String, StyleId>,
        reject_bind: bool,
    }

    impl StyleFactory for Sheet {
        fn materialize(&self, _: &StyleDescriptor) -> std::result::Result<StyleId, MaterializeError> {
            self.materialized.fetch_add(1, Ordering::SeqCst);
            Ok(StyleId::new(99))
        }
    }

    impl DocumentContext for Sheet {
        fn bind_style(&mut self, target: &str, id: StyleId) -> std::result::Result<(), MaterializeError> {
            if self.reject_bind {
                return Err(MaterializeError::other("sheet is protected"));
            }
            self.bound.insert(target.to_string(), id);
            Ok(())
        }
    }

    #[test]
    fn test_descriptor_returns_copy() {
        let keys = CacheKeyGenerator::default();
        let handle = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();

        let mut copy = handle.descriptor();
        copy.font.bold = false;
        assert!(handle.descriptor().font.bold);
    }

    #[test]
    fn test_materialized_handle_applies_directly() {
        let key = CacheKeyGenerator::default()
            .key(&StyleDescriptor::new().italic(true))
            .unwrap();
        let handle = StyleHandle::materialized(key, StyleDescriptor::new().italic(true), StyleId::new(5));

        let mut sheet = Sheet::default();
        handle.apply(&mut sheet, "A1").unwrap();
        assert_eq!(sheet.bound.get("A1"), Some(&StyleId::new(5)));
        assert_eq!(sheet.materialized.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detached_handle_materializes_once() {
        let keys = CacheKeyGenerator::default();
        let handle = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
        assert_eq!(handle.style_id(), None);

        let mut sheet = Sheet::default();
        handle.apply(&mut sheet, "A1").unwrap();
        handle.apply(&mut sheet, "A2").unwrap();

        assert_eq!(handle.style_id(), Some(StyleId::new(99)));
        assert_eq!(sheet.materialized.load(Ordering::SeqCst), 1);
        assert_eq!(sheet.bound.len(), 2);
    }

    #[test]
    fn test_bind_failure_is_apply_error() {
        let keys = CacheKeyGenerator::default();
        let handle = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
        let mut sheet = Sheet {
            reject_bind: true,
            ..Default::default()
        };

        let err = handle.apply(&mut sheet, "C3").unwrap_err();
        assert!(matches!(err, StyleCacheError::Apply { ref target, .. } if target == "C3"));
    }

    #[test]
    fn test_equality_by_key_and_instance() {
        let keys = CacheKeyGenerator::default();
        let a = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
        let b = StyleHandle::detached(StyleDescriptor::new().bold(true), &keys).unwrap();
        let c = StyleHandle::detached(StyleDescriptor::new().italic(true), &keys).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.same_instance(&a.clone()));
        assert!(!a.same_instance(&b));
        assert_eq!(a.share_count(), 1);
    }
}
