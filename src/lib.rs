//! # Stylecache
//!
//! A thread-safe style-deduplication cache for document generation.
//!
//! Describe a cell's formatting with a [`StyleDescriptor`], resolve it through
//! a [`StyleRegistry`], and attach the returned [`StyleHandle`] to as many
//! cells as you like. Each distinct style is registered with the document
//! engine once.
//!
//! ## Quick Start
//!
//! ```rust
//! use stylecache::{MaterializeError, StyleDescriptor, StyleId, StyleRegistry};
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! // The document engine's registration call
//! let next = AtomicU64::new(0);
//! let registry = StyleRegistry::new(move |_: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
//!     Ok(StyleId::new(next.fetch_add(1, Ordering::SeqCst)))
//! });
//!
//! let header = StyleDescriptor::new().bold(true).font_size(12).fill("pattern", "#DDEBF7");
//! let first = registry.get_or_create(&header).unwrap();
//! let again = registry.get_or_create(&header.clone()).unwrap();
//!
//! assert!(first.same_instance(&again));
//! assert_eq!(registry.size(), 1);
//! ```
//!
//! ## Bounded Registries
//!
//! Registries evict the least recently used style once they exceed their
//! capacity (1024 by default, 0 for unbounded):
//!
//! ```rust
//! use stylecache::{MaterializeError, RegistryConfig, StyleDescriptor, StyleId, StyleRegistry};
//!
//! let registry = StyleRegistry::with_config(
//!     |_: &StyleDescriptor| -> Result<StyleId, MaterializeError> { Ok(StyleId::new(1)) },
//!     RegistryConfig::default().with_capacity(2),
//! );
//!
//! let a = StyleDescriptor::new().bold(true);
//! let b = StyleDescriptor::new().italic(true);
//! let c = StyleDescriptor::new().underline(true);
//! for d in [&a, &b, &c] {
//!     registry.get_or_create(d).unwrap();
//! }
//!
//! assert!(!registry.contains(&a));
//! assert!(registry.contains(&b) && registry.contains(&c));
//! ```
//!
//! ## Error Handling
//!
//! Engine failures are returned and never cached, so a later request retries:
//!
//! ```rust
//! use stylecache::{MaterializeError, MaterializeErrorKind, StyleDescriptor, StyleId, StyleRegistry};
//!
//! let registry = StyleRegistry::new(|d: &StyleDescriptor| -> Result<StyleId, MaterializeError> {
//!     if d.number_format.contains('[') && !d.number_format.contains(']') {
//!         return Err(MaterializeError::new(MaterializeErrorKind::InvalidNumberFormat, "unclosed ["));
//!     }
//!     Ok(StyleId::new(1))
//! });
//!
//! let broken = StyleDescriptor::new().number_format("[Red0.00");
//! assert!(registry.get_or_create(&broken).is_err());
//! assert_eq!(registry.size(), 0);
//! ```

pub use stylecache_core::*;
