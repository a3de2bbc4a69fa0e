//! Property-Based Tests for the Cached Name Index
//!
//! **Property 1: Search Determinism**
//! Repeating a query against an unchanged index yields the same page.
//!
//! **Property 2: Model Agreement**
//! A search equals dedup, stable case-insensitive sort, filter and slice
//! applied directly to the upstream listing.
//!
//! **Property 3: Cache-Aside**
//! A warm index never reaches the catalog; a cold one reaches it exactly
//! once per search until a write succeeds.

use std::sync::Arc;

use pokedex_api::NameIndexService;
use pokedex_core::{dedup_names, filter_names, paginate, sort_names};
use pokedex_test_utils::assertions::assert_sorted_page;
use pokedex_test_utils::fixtures::{index_payload, numbered_names};
use pokedex_test_utils::generators::{arb_case_colliding_names, arb_names, arb_search_query};
use pokedex_test_utils::{
    names, CatalogItemName, FailingCache, InMemoryCache, KeyValueCache, MockCatalog, SearchQuery,
    SearchResult, NAME_INDEX_KEY, NAME_INDEX_TTL_SECS,
};
use proptest::prelude::*;

// ============================================================================
// TEST CONFIGURATION
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
}

fn search(
    rt: &tokio::runtime::Runtime,
    index: &NameIndexService,
    query: &SearchQuery,
) -> Result<SearchResult, TestCaseError> {
    rt.block_on(index.try_search(query))
        .map_err(|e| TestCaseError::fail(e.to_string()))
}

fn service(catalog: MockCatalog) -> (NameIndexService, Arc<MockCatalog>, Arc<InMemoryCache>) {
    let catalog = Arc::new(catalog);
    let cache = Arc::new(InMemoryCache::new());
    let index = NameIndexService::new(catalog.clone(), cache.clone());
    (index, catalog, cache)
}

/// The page a search should return, computed without the service.
fn expected_page(
    upstream: &[CatalogItemName],
    query: &SearchQuery,
) -> (usize, Vec<CatalogItemName>) {
    let mut all = dedup_names(upstream.to_vec());
    sort_names(&mut all);
    let matching = filter_names(&all, query.term.as_deref());
    let page = paginate(&matching, query.page, query.page_size);
    (matching.len(), page)
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_search_matches_model(upstream in arb_names(40), query in arb_search_query()) {
        let rt = runtime();
        let (index, _, _) = service(MockCatalog::with_names(upstream.clone()));

        let result = search(&rt, &index, &query)?;
        let (total, page) = expected_page(&upstream, &query);

        prop_assert_eq!(result.total_count, total);
        prop_assert_eq!(&result.items, &page);
        prop_assert!(result.items.len() <= query.page_size as usize);
        assert_sorted_page(&result.items);
    }

    #[test]
    fn prop_search_is_idempotent(upstream in arb_names(30), query in arb_search_query()) {
        // An empty listing caches `[]`, which reads back as a miss.
        prop_assume!(!upstream.is_empty());
        let rt = runtime();
        let (index, catalog, _) = service(MockCatalog::with_names(upstream));

        let first = search(&rt, &index, &query)?;
        let second = search(&rt, &index, &query)?;

        prop_assert_eq!(first, second);
        prop_assert!(catalog.list_calls() <= 1);
    }

    #[test]
    fn prop_case_equal_names_keep_upstream_order(upstream in arb_case_colliding_names(20)) {
        let rt = runtime();
        let (index, _, _) = service(MockCatalog::with_names(upstream.clone()));
        let query = SearchQuery::new(1, 100, None);

        let result = search(&rt, &index, &query)?;

        // Within each case-insensitive group, first-seen upstream order survives.
        let deduped = dedup_names(upstream);
        for base in ["abra", "eevee", "mew", "zubat"] {
            let in_group = |n: &&String| n.to_lowercase() == base;
            let from_upstream: Vec<_> = deduped.iter().filter(in_group).collect();
            let from_result: Vec<_> = result.items.iter().filter(in_group).collect();
            prop_assert_eq!(from_upstream, from_result);
        }
    }

    #[test]
    fn prop_warm_cache_never_reaches_catalog(cached in arb_names(30), query in arb_search_query()) {
        prop_assume!(!cached.is_empty());
        let rt = runtime();
        let catalog = MockCatalog::with_names(names(&["should-not-appear"]));
        let (index, catalog, cache) = service(catalog);
        rt.block_on(cache.set(NAME_INDEX_KEY, &index_payload(&cached), NAME_INDEX_TTL_SECS))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let result = search(&rt, &index, &query)?;

        prop_assert_eq!(catalog.list_calls(), 0);
        prop_assert!(!result.items.iter().any(|n| n == "should-not-appear"));
        assert_sorted_page(&result.items);
    }
}

// ============================================================================
// CACHE-ASIDE BEHAVIOR
// ============================================================================

#[tokio::test]
async fn test_unwritable_cache_fetches_on_every_search() {
    let catalog = Arc::new(MockCatalog::with_names(numbered_names(5)));
    let cache = Arc::new(FailingCache::new());
    let index = NameIndexService::new(catalog.clone(), cache.clone());

    for expected_calls in 1..=3 {
        let result = index.search(&SearchQuery::default()).await;
        assert!(result.is_ok());
        assert_eq!(catalog.list_calls(), expected_calls);
    }
    assert_eq!(cache.write_attempts(), 3);
}

#[tokio::test]
async fn test_empty_listing_is_refetched_on_every_search() {
    let (index, catalog, _) = service(MockCatalog::with_names(Vec::new()));

    let first = index.search(&SearchQuery::default()).await.expect("first search");
    let second = index.search(&SearchQuery::default()).await.expect("second search");

    assert_eq!(first, second);
    assert_eq!(first.total_count, 0);
    assert_eq!(catalog.list_calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_searches_each_fetch() {
    const SEARCHES: usize = 4;
    let (index, catalog, cache) =
        service(MockCatalog::with_names(numbered_names(12)).with_listing_gate(SEARCHES));

    let handles: Vec<_> = (0..SEARCHES)
        .map(|_| {
            let index = index.clone();
            tokio::spawn(async move { index.try_search(&SearchQuery::default()).await })
        })
        .collect();

    let mut pages = Vec::new();
    for handle in handles {
        let result = handle.await.expect("search task panicked");
        pages.push(result.expect("search failed"));
    }

    assert_eq!(catalog.list_calls(), SEARCHES);
    assert!(pages.windows(2).all(|w| w[0] == w[1]));
    assert!(cache.exists(NAME_INDEX_KEY).await);
}

// ============================================================================
// PAGINATION BOUNDARIES
// ============================================================================

#[tokio::test]
async fn test_page_boundaries_over_fifteen_names() {
    let (index, _, _) = service(MockCatalog::with_names(numbered_names(15)));

    let second = index
        .search(&SearchQuery::new(2, 10, None))
        .await
        .expect("second page");
    assert_eq!(second.total_count, 15);
    assert_eq!(second.items, (11..=15).map(|i| format!("mon-{:03}", i)).collect::<Vec<_>>());

    let far = index
        .search(&SearchQuery::new(100, 10, None))
        .await
        .expect("page past the end");
    assert_eq!(far.total_count, 15);
    assert!(far.items.is_empty());
}

#[tokio::test]
async fn test_term_is_trimmed_and_case_folded() {
    let (index, _, _) = service(MockCatalog::with_names(names(&["Pikachu", "Raichu", "Pichu"])));

    let result = index
        .search(&SearchQuery::default().with_term("  CHU "))
        .await
        .expect("search");

    assert_eq!(result.total_count, 3);
    assert_eq!(result.items, names(&["Pichu", "Pikachu", "Raichu"]));
}
