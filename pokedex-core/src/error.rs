//! Error types for Pokedex operations

use thiserror::Error;

/// Errors raised while talking to the upstream catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Upstream {operation} failed{}: {reason}", status_suffix(.status))]
    Upstream {
        operation: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Catalog item not found: {name}")]
    NotFound { name: String },
}

impl CatalogError {
    pub fn upstream(
        operation: impl Into<String>,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            operation: operation.into(),
            status,
            reason: reason.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" with status {}", s))
        .unwrap_or_default()
}

/// Errors raised by a key-value cache backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Cache write failed for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Errors raised while encoding or decoding the cached name index.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Cached index under {key} is not a JSON array of names: {reason}")]
    Decode { key: String, reason: String },

    #[error("Failed to encode name index: {reason}")]
    Encode { reason: String },
}

/// Master error type for all Pokedex errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PokedexError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

impl PokedexError {
    /// Whether the upstream catalog reported the item as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::Catalog(CatalogError::NotFound { .. }))
    }
}

/// The single outcome a failed query reports across the service boundary.
///
/// Carries no detail; the cause is logged where the failure happens.
#[derive(Debug, Clone, Copy, Default, Error, PartialEq, Eq)]
#[error("query failed")]
pub struct QueryFailed;

/// Result type alias for Pokedex operations.
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_with_status() {
        let err = CatalogError::upstream("list", Some(503), "Service Unavailable");
        let msg = format!("{}", err);
        assert!(msg.contains("list"));
        assert!(msg.contains("503"));
        assert!(msg.contains("Service Unavailable"));
    }

    #[test]
    fn test_upstream_error_display_without_status() {
        let err = CatalogError::upstream("list", None, "connection refused");
        let msg = format!("{}", err);
        assert!(!msg.contains("status"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = PokedexError::from(CatalogError::not_found("missingno"));
        assert!(err.is_not_found());

        let err = PokedexError::from(CatalogError::upstream("detail", Some(500), "boom"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_pokedex_error_from_variants() {
        let cache = PokedexError::from(CacheError::Unavailable {
            reason: "refused".to_string(),
        });
        assert!(matches!(cache, PokedexError::Cache(_)));

        let index = PokedexError::from(IndexError::Encode {
            reason: "bad".to_string(),
        });
        assert!(matches!(index, PokedexError::Index(_)));
    }

    #[test]
    fn test_query_failed_is_opaque() {
        assert_eq!(QueryFailed.to_string(), "query failed");
    }
}
