//! Pokedex Test Utilities
//!
//! Centralized test infrastructure for the Pokedex workspace:
//! - Mock catalog and cache backends with call counting and failure injection
//! - Proptest generators for names and queries
//! - Test fixtures for common scenarios
//! - Custom assertions for Pokedex-specific validation

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

// Re-export core types for convenience
pub use pokedex_catalog::CatalogClient;
pub use pokedex_core::{
    AbilityRecord, CacheError, CacheResult, CatalogError, CatalogItemName, CatalogResult,
    IndexError, PokedexError, PokedexResult, QueryFailed, SearchQuery, SearchResult,
};
pub use pokedex_storage::{InMemoryCache, KeyValueCache, NAME_INDEX_KEY, NAME_INDEX_TTL_SECS};

pub use fixtures::names;

// ============================================================================
// MOCK CATALOG
// ============================================================================

/// In-process [`CatalogClient`] with scripted responses.
///
/// Ability lookups match names case-insensitively, like the real catalog.
/// Every call is counted so tests can assert how often the upstream was hit.
#[derive(Debug, Default)]
pub struct MockCatalog {
    names: Vec<CatalogItemName>,
    abilities: HashMap<String, Vec<AbilityRecord>>,
    listing_error: Option<CatalogError>,
    detail_error: Option<CatalogError>,
    listing_gate: Option<Arc<Barrier>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog whose listing returns `names` in the given order.
    pub fn with_names(names: Vec<CatalogItemName>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// Catalog whose listing always fails with `error`.
    pub fn failing_listing(error: CatalogError) -> Self {
        Self {
            listing_error: Some(error),
            ..Self::default()
        }
    }

    /// Register the abilities returned for `name`.
    pub fn with_abilities(mut self, name: &str, abilities: Vec<AbilityRecord>) -> Self {
        self.abilities.insert(name.to_lowercase(), abilities);
        self
    }

    /// Make every ability lookup fail with `error`.
    pub fn with_detail_error(mut self, error: CatalogError) -> Self {
        self.detail_error = Some(error);
        self
    }

    /// Hold each listing call until `parties` calls are in flight together.
    ///
    /// Fewer than `parties` concurrent callers never return.
    pub fn with_listing_gate(mut self, parties: usize) -> Self {
        self.listing_gate = Some(Arc::new(Barrier::new(parties)));
        self
    }

    /// Number of `fetch_all_names` calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_abilities` calls so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn fetch_all_names(&self) -> CatalogResult<Vec<CatalogItemName>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.listing_gate {
            gate.wait().await;
        }
        match &self.listing_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.names.clone()),
        }
    }

    async fn fetch_abilities(&self, name: &str) -> CatalogResult<Vec<AbilityRecord>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.detail_error {
            return Err(err.clone());
        }
        self.abilities
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::not_found(name))
    }

    fn provider_id(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// FAILING CACHE
// ============================================================================

/// A [`KeyValueCache`] whose backend is permanently unreachable.
///
/// Reads miss, writes and pings fail. Writes are still counted.
#[derive(Debug, Default)]
pub struct FailingCache {
    write_attempts: AtomicUsize,
}

impl FailingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueCache for FailingCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, key: &str, _value: &str, _ttl_secs: u64) -> CacheResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::WriteFailed {
            key: key.to_string(),
            reason: "connection refused".to_string(),
        })
    }

    async fn exists(&self, _key: &str) -> bool {
        false
    }

    async fn ping(&self) -> CacheResult<()> {
        Err(CacheError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating test data.

    use super::*;
    use proptest::prelude::*;

    /// Catalog-style names: a letter of either case, then lowercase
    /// letters, digits and dashes.
    pub fn arb_name() -> impl Strategy<Value = CatalogItemName> {
        "[A-Za-z][a-z0-9-]{0,11}"
    }

    /// Up to `max` names, duplicates allowed.
    pub fn arb_names(max: usize) -> impl Strategy<Value = Vec<CatalogItemName>> {
        prop::collection::vec(arb_name(), 0..=max)
    }

    /// Names that differ from each other only by case are possible and
    /// likely: a small alphabet is sampled with random casing.
    pub fn arb_case_colliding_names(max: usize) -> impl Strategy<Value = Vec<CatalogItemName>> {
        prop::collection::vec(
            (prop::sample::select(vec!["eevee", "abra", "mew", "zubat"]), any::<u8>()).prop_map(
                |(base, mask)| {
                    base.chars()
                        .enumerate()
                        .map(|(i, c)| {
                            if mask & (1 << (i % 8)) != 0 {
                                c.to_ascii_uppercase()
                            } else {
                                c
                            }
                        })
                        .collect::<String>()
                },
            ),
            0..=max,
        )
    }

    /// Optional term, sometimes blank or padded.
    pub fn arb_term() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("   ".to_string())),
            "[a-zA-Z]{1,3}".prop_map(Some),
            "[a-z]{1,2}".prop_map(|t| Some(format!("  {} ", t))),
        ]
    }

    pub fn arb_search_query() -> impl Strategy<Value = SearchQuery> {
        (1u32..=20, 1u32..=25, arb_term())
            .prop_map(|(page, page_size, term)| SearchQuery::new(page, page_size, term))
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common scenarios.

    use super::*;

    /// Owned names from string literals.
    pub fn names(items: &[&str]) -> Vec<CatalogItemName> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// A small, unsorted, mixed-case listing.
    pub fn starter_names() -> Vec<CatalogItemName> {
        names(&["pikachu", "Bulbasaur", "charmander", "squirtle", "charizard"])
    }

    /// `count` distinct names whose sorted order is their numeric order:
    /// `mon-001`, `mon-002`, ...
    pub fn numbered_names(count: usize) -> Vec<CatalogItemName> {
        (1..=count).rev().map(|i| format!("mon-{:03}", i)).collect()
    }

    pub fn pikachu_abilities() -> Vec<AbilityRecord> {
        vec![
            AbilityRecord::new("static", false),
            AbilityRecord::new("lightning-rod", true),
        ]
    }

    /// Catalog preloaded with [`starter_names`] and Pikachu's abilities.
    pub fn starter_catalog() -> MockCatalog {
        MockCatalog::with_names(starter_names()).with_abilities("pikachu", pikachu_abilities())
    }

    /// JSON payload in the format the name index is cached as.
    pub fn index_payload(items: &[CatalogItemName]) -> String {
        serde_json::Value::from(items.to_vec()).to_string()
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for Pokedex-specific validation.

    use super::*;

    /// Assert that a PokedexResult is a catalog NotFound error.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &PokedexResult<T>) {
        match result {
            Err(PokedexError::Catalog(CatalogError::NotFound { .. })) => {}
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    /// Assert that a PokedexResult is a catalog Upstream error.
    #[track_caller]
    pub fn assert_upstream_error<T: std::fmt::Debug>(result: &PokedexResult<T>) {
        match result {
            Err(PokedexError::Catalog(CatalogError::Upstream { .. })) => {}
            other => panic!("Expected Upstream error, got: {:?}", other),
        }
    }

    /// Assert that a boundary call failed with the opaque QueryFailed.
    #[track_caller]
    pub fn assert_query_failed<T: std::fmt::Debug>(result: &Result<T, QueryFailed>) {
        assert!(
            matches!(result, Err(QueryFailed)),
            "Expected QueryFailed, got: {:?}",
            result
        );
    }

    /// Assert that `items` is one page of names in case-insensitive order.
    #[track_caller]
    pub fn assert_sorted_page(items: &[CatalogItemName]) {
        for pair in items.windows(2) {
            assert_ne!(
                pokedex_core::compare_names(&pair[0], &pair[1]),
                std::cmp::Ordering::Greater,
                "Out of order: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}
