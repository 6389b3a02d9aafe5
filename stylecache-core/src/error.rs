//! Error types for stylecache-core

use crate::factory::MaterializeError;
use thiserror::Error;

/// Result type alias using [`StyleCacheError`]
pub type Result<T> = std::result::Result<T, StyleCacheError>;

/// Errors surfaced by the style registry and its handles.
///
/// Callers usually treat any of these as "style unavailable" and decide
/// locally whether to fall back to an unstyled target or to propagate.
#[derive(Debug, Error)]
pub enum StyleCacheError {
    /// The descriptor could not be canonicalized into a cache key.
    #[error("cannot derive cache key: {reason}")]
    KeyGeneration { reason: String },

    /// The document engine rejected the descriptor.
    ///
    /// Never cached: a later request with the same descriptor retries.
    #[error("failed to materialize style {key}: {source}")]
    Materialization {
        key: String,
        #[source]
        source: MaterializeError,
    },

    /// An invalid capacity was requested; the previous capacity is kept.
    #[error("invalid registry capacity: {requested}")]
    CapacityConfiguration { requested: i64 },

    /// The document engine refused to bind a style to a target.
    #[error("failed to apply style to {target}: {reason}")]
    Apply { target: String, reason: String },
}

impl StyleCacheError {
    /// Returns `true` if this error came from the external document engine.
    pub fn is_materialization(&self) -> bool {
        matches!(self, StyleCacheError::Materialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::MaterializeErrorKind;
    use std::error::Error as _;

    #[test]
    fn test_materialization_error_keeps_source() {
        let err = StyleCacheError::Materialization {
            key: "F{b}".to_string(),
            source: MaterializeError::new(MaterializeErrorKind::InvalidColor, "#GGG"),
        };
        assert!(err.is_materialization());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("F{b}"));
    }

    #[test]
    fn test_capacity_error_message() {
        let err = StyleCacheError::CapacityConfiguration { requested: -3 };
        assert_eq!(err.to_string(), "invalid registry capacity: -3");
        assert!(!err.is_materialization());
    }
}
