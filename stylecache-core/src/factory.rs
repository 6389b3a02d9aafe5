//! The seam between the registry and the document engine.
//!
//! The registry never talks to the engine directly. It only needs something
//! that can turn a [`StyleDescriptor`] into an opaque [`StyleId`], and, for
//! [`StyleHandle::apply`](crate::StyleHandle::apply), something that can bind
//! such an identifier to a location in the document.

use crate::descriptor::StyleDescriptor;
use std::fmt;
use thiserror::Error;

/// Opaque identifier returned by the document engine for a registered style.
///
/// The registry never interprets the value; it only stores it on the handle
/// and hands it back to the engine when the style is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u64);

impl StyleId {
    /// Wraps a raw engine identifier.
    pub const fn new(raw: u64) -> Self {
        StyleId(raw)
    }

    /// Returns the raw engine identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "style#{}", self.0)
    }
}

/// Why the document engine refused a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeErrorKind {
    /// A color string the engine does not understand
    InvalidColor,
    /// A malformed number format string
    InvalidNumberFormat,
    /// The engine ran out of style slots or memory
    ResourceLimit,
    /// Anything else
    Other,
}

impl fmt::Display for MaterializeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterializeErrorKind::InvalidColor => "invalid color",
            MaterializeErrorKind::InvalidNumberFormat => "invalid number format",
            MaterializeErrorKind::ResourceLimit => "resource limit reached",
            MaterializeErrorKind::Other => "engine error",
        };
        f.write_str(s)
    }
}

/// Error reported by the document engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct MaterializeError {
    kind: MaterializeErrorKind,
    message: String,
}

impl MaterializeError {
    /// Creates a new engine error.
    pub fn new<S: Into<String>>(kind: MaterializeErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`MaterializeErrorKind::Other`] error.
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::new(MaterializeErrorKind::Other, message)
    }

    pub fn kind(&self) -> MaterializeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Registers styles with the document engine.
///
/// Implementations perform a side-effecting registration and may fail. The
/// registry calls [`materialize`](StyleFactory::materialize) at most once per
/// distinct cache key while that key stays cached, and never while holding
/// a stale view of the map.
///
/// Closures work out of the box:
///
/// ```
/// use stylecache_core::{MaterializeError, StyleDescriptor, StyleFactory, StyleId};
///
/// let factory = |_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
///     Ok(StyleId::new(7))
/// };
/// assert_eq!(factory.materialize(&StyleDescriptor::new()).unwrap(), StyleId::new(7));
/// ```
pub trait StyleFactory: Send + Sync {
    fn materialize(&self, descriptor: &StyleDescriptor) -> Result<StyleId, MaterializeError>;
}

impl<F> StyleFactory for F
where
    F: Fn(&StyleDescriptor) -> Result<StyleId, MaterializeError> + Send + Sync,
{
    fn materialize(&self, descriptor: &StyleDescriptor) -> Result<StyleId, MaterializeError> {
        self(descriptor)
    }
}

/// A document that can both register styles and attach them to locations.
///
/// `target` is whatever the engine uses to address a location, typically an
/// A1-style cell reference.
pub trait DocumentContext: StyleFactory {
    fn bind_style(&mut self, target: &str, id: StyleId) -> Result<(), MaterializeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_factory() {
        let next = AtomicU64::new(1);
        let factory = move |_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
            Ok(StyleId::new(next.fetch_add(1, Ordering::SeqCst)))
        };

        let d = StyleDescriptor::new().bold(true);
        assert_eq!(factory.materialize(&d).unwrap(), StyleId::new(1));
        assert_eq!(factory.materialize(&d).unwrap(), StyleId::new(2));
    }

    #[test]
    fn test_trait_object_factories() {
        let boxed: Box<dyn StyleFactory> =
            Box::new(|_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
                Err(MaterializeError::new(
                    MaterializeErrorKind::ResourceLimit,
                    "too many styles",
                ))
            });
        let err = boxed.materialize(&StyleDescriptor::new()).unwrap_err();
        assert_eq!(err.kind(), MaterializeErrorKind::ResourceLimit);
        assert_eq!(err.to_string(), "resource limit reached: too many styles");

        let arced: Arc<dyn StyleFactory> =
            Arc::new(|_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
                Ok(StyleId::new(42))
            });
        assert_eq!(arced.materialize(&StyleDescriptor::new()).unwrap().get(), 42);
    }

    #[test]
    fn test_style_id_display() {
        assert_eq!(StyleId::new(3).to_string(), "style#3");
    }
}
