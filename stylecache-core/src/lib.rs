//! # Stylecache Core
//!
//! Core types for the stylecache style-deduplication library.
//!
//! Generated documents often contain thousands of cells sharing the same
//! formatting. Instead of registering an equivalent style with the document
//! engine for each of them, callers describe the style with a
//! [`StyleDescriptor`] and ask a [`StyleRegistry`] for the matching
//! [`StyleHandle`]. The registry registers each distinct style with the
//! engine once and hands out the same shared handle from then on.
//!
//! ## Features
//!
//! - **Deterministic keys**: equal descriptors always yield the same [`CacheKey`]
//! - **At most one materialization** per distinct style, even under concurrency
//! - **Bounded memory**: least-recently-used eviction with a logical clock
//! - **Failure-aware**: engine errors are returned, never cached
//! - **Statistics**: hits, misses, evictions, hit rate
//!
//! ## Module Organization
//!
//! - [`descriptor`] - Semantic style descriptions
//! - [`keys`] - Canonical cache key derivation
//! - [`factory`] - The document-engine seam ([`StyleFactory`], [`DocumentContext`])
//! - [`handle`] - Shared flyweight handles
//! - [`registry`] - The thread-safe registry with LRU eviction
//! - [`utils`] - Eviction helpers
//!
mod cache_entry;
mod config;
mod error;
mod stats;

pub mod descriptor;
pub mod factory;
pub mod handle;
pub mod keys;
pub mod registry;
pub mod utils;

pub use cache_entry::CacheEntry;
pub use config::{RegistryConfig, DEFAULT_CAPACITY};
pub use descriptor::{
    AlignmentSpec, BorderEdge, BorderSide, BorderSpec, FillSpec, FontSpec, Protection,
    StyleDescriptor,
};
pub use error::{Result, StyleCacheError};
pub use factory::{DocumentContext, MaterializeError, MaterializeErrorKind, StyleFactory, StyleId};
pub use handle::StyleHandle;
pub use keys::{CacheKey, CacheKeyGenerator, DEFAULT_HASH_THRESHOLD};
pub use registry::StyleRegistry;
pub use stats::{CacheStats, StatsSnapshot};
