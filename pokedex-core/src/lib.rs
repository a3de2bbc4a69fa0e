//! Pokedex Core - Data Types
//!
//! Pure data structures shared by every other crate in the workspace, plus
//! the synchronous primitives the name index is built from (collation,
//! filtering, pagination). No I/O lives here.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod filter;

pub use error::{
    CacheError, CacheResult, CatalogError, CatalogResult, IndexError, PokedexError,
    PokedexResult, QueryFailed,
};
pub use filter::{compare_names, dedup_names, filter_names, paginate, sort_names};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Name of a catalog item exactly as the upstream catalog spells it.
///
/// Case is preserved; it is only folded for comparison and matching.
pub type CatalogItemName = String;

/// Default page when the caller supplies none.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// DETAIL RECORDS
// ============================================================================

/// A single ability of a catalog item.
///
/// Never persisted: rebuilt from the upstream catalog on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AbilityRecord {
    /// Ability identifier (e.g. "static")
    pub name: String,
    /// Whether this is a hidden ability
    pub hidden: bool,
}

impl AbilityRecord {
    pub fn new(name: impl Into<String>, hidden: bool) -> Self {
        Self {
            name: name.into(),
            hidden,
        }
    }
}

// ============================================================================
// SEARCH TYPES
// ============================================================================

/// A paginated, optionally filtered lookup against the name index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchQuery {
    /// 1-based page number
    pub page: u32,
    /// Number of names per page
    pub page_size: u32,
    /// Optional substring term
    pub term: Option<String>,
}

impl SearchQuery {
    /// Build a query, clamping `page` and `page_size` to at least 1.
    pub fn new(page: u32, page_size: u32, term: Option<String>) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            term,
        }
    }

    /// Set the search term.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// The trimmed, lower-cased term, or `None` when absent or blank.
    pub fn normalized_term(&self) -> Option<String> {
        self.term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, None)
    }
}

/// One page of the filtered, sorted name set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    /// Size of the filtered set before pagination
    pub total_count: usize,
    /// The requested page, in collation order
    pub items: Vec<CatalogItemName>,
}

// ============================================================================
// TESTS
// ============================================================================
