//! HTTP tests for the Pokedex API router
//!
//! Exercises the public routes end to end against a mock catalog and the
//! in-memory cache, checking the exact JSON shapes clients depend on.

use std::sync::Arc;

use pokedex_test_utils::fixtures::{numbered_names, pikachu_abilities, starter_catalog};
use pokedex_test_utils::{names, CatalogError, FailingCache, MockCatalog};
use serde_json::json;

#[path = "support/app.rs"]
mod app_support;
use app_support::{get_json, get_text, test_router, test_router_with_cache};

// ============================================================================
// SEARCH
// ============================================================================

#[tokio::test]
async fn test_search_returns_sorted_names_and_count() {
    let (router, _) = test_router(starter_catalog());

    let (status, body) = get_json(&router, "/pokemon?page=1&totalperpage=3").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "data": {
                "count": 5,
                "pokemons": [
                    { "Name": "Bulbasaur" },
                    { "Name": "charizard" },
                    { "Name": "charmander" },
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_search_filters_case_insensitively() {
    let (router, _) = test_router(starter_catalog());

    let (status, body) = get_json(&router, "/pokemon?p=CHAR").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(
        body["data"]["pokemons"],
        json!([{ "Name": "charizard" }, { "Name": "charmander" }])
    );
}

#[tokio::test]
async fn test_search_accepts_alias_parameters() {
    let (router, _) = test_router(MockCatalog::with_names(numbered_names(15)));

    let (status, body) = get_json(&router, "/pokemon?page=2&pageSize=4&term=mon").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["count"], 15);
    assert_eq!(
        body["data"]["pokemons"],
        json!([
            { "Name": "mon-005" },
            { "Name": "mon-006" },
            { "Name": "mon-007" },
            { "Name": "mon-008" },
        ])
    );
}

#[tokio::test]
async fn test_search_repeated_or_aliased_keys_are_not_rejected() {
    let (router, _) = test_router(MockCatalog::with_names(numbered_names(15)));

    let (status, body) = get_json(&router, "/pokemon?totalperpage=2&pageSize=3").await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"]["pokemons"],
        json!([{ "Name": "mon-001" }, { "Name": "mon-002" }])
    );

    let (status, body) = get_json(&router, "/pokemon?page=1&page=2&totalperpage=5").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["pokemons"][0], json!({ "Name": "mon-001" }));
}

#[tokio::test]
async fn test_search_invalid_numbers_fall_back_to_defaults() {
    let (router, _) = test_router(MockCatalog::with_names(numbered_names(15)));

    let (status, body) = get_json(&router, "/pokemon?page=zero&totalperpage=-3").await;

    assert_eq!(status, 200);
    let pokemons = body["data"]["pokemons"].as_array().cloned().unwrap_or_default();
    assert_eq!(pokemons.len(), 10);
    assert_eq!(pokemons[0], json!({ "Name": "mon-001" }));
}

#[tokio::test]
async fn test_search_page_past_end_is_empty_with_full_count() {
    let (router, _) = test_router(MockCatalog::with_names(numbered_names(15)));

    let (status, body) = get_json(&router, "/pokemon?page=100").await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "data": { "count": 15, "pokemons": [] } }));
}

#[tokio::test]
async fn test_search_no_match_is_empty() {
    let (router, _) = test_router(starter_catalog());

    let (_, body) = get_json(&router, "/pokemon?p=mewtwo").await;

    assert_eq!(body, json!({ "data": { "count": 0, "pokemons": [] } }));
}

#[tokio::test]
async fn test_search_upstream_failure_is_opaque_400() {
    let (router, _) = test_router(MockCatalog::failing_listing(CatalogError::upstream(
        "list",
        Some(502),
        "bad gateway",
    )));

    let (status, body) = get_json(&router, "/pokemon").await;

    assert_eq!(status, 400);
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(body["error"]["code"], "QUERY_FAILED");
    assert_eq!(body["error"]["message"], "Something went wrong with the request");
}

#[tokio::test]
async fn test_second_search_is_served_from_cache() {
    let (router, catalog) = test_router(starter_catalog());

    get_json(&router, "/pokemon").await;
    get_json(&router, "/pokemon?p=pika").await;

    assert_eq!(catalog.list_calls(), 1);
}

// ============================================================================
// ABILITIES
// ============================================================================

#[tokio::test]
async fn test_abilities_returns_catalog_order() {
    let (router, _) = test_router(starter_catalog());

    let (status, body) = get_json(&router, "/pokemon/ability?name=Pikachu").await;

    assert_eq!(status, 200);
    let expected: Vec<_> = pikachu_abilities()
        .into_iter()
        .map(|a| json!({ "ability": a.name, "hidden": a.hidden }))
        .collect();
    assert_eq!(body, json!({ "data": expected }));
}

#[tokio::test]
async fn test_abilities_missing_name_is_400() {
    let (router, catalog) = test_router(starter_catalog());

    for uri in ["/pokemon/ability", "/pokemon/ability?name=", "/pokemon/ability?name=%20%20"] {
        let (status, body) = get_json(&router, uri).await;
        assert_eq!(status, 400, "{}", uri);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["error"]["code"], "MISSING_FIELD");
    }
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn test_abilities_unknown_name_is_query_failed() {
    let (router, _) = test_router(starter_catalog());

    let (status, body) = get_json(&router, "/pokemon/ability?name=missingno").await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "QUERY_FAILED");
}

#[tokio::test]
async fn test_abilities_upstream_failure_is_opaque_400() {
    let (router, catalog) = test_router(starter_catalog().with_detail_error(
        CatalogError::upstream("detail", Some(500), "internal error"),
    ));

    let (status, body) = get_json(&router, "/pokemon/ability?name=pikachu").await;

    assert_eq!(status, 400);
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(body["error"]["code"], "QUERY_FAILED");
    assert_eq!(body["error"]["message"], "Something went wrong with the request");
    assert!(!body.to_string().contains("internal error"));
    assert_eq!(catalog.detail_calls(), 1);
}

#[tokio::test]
async fn test_abilities_do_not_touch_the_name_index() {
    let (router, catalog) = test_router(starter_catalog());

    get_json(&router, "/pokemon/ability?name=pikachu").await;

    assert_eq!(catalog.list_calls(), 0);
}

// ============================================================================
// HEALTH AND OBSERVABILITY
// ============================================================================

#[tokio::test]
async fn test_ping() {
    let (router, _) = test_router(MockCatalog::new());

    let (status, body) = get_text(&router, "/health/ping").await;

    assert_eq!(status, 200);
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn test_ready_with_memory_cache() {
    let (router, _) = test_router(MockCatalog::with_names(names(&["eevee"])));

    let (status, body) = get_json(&router, "/health/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["details"]["cache"]["backend"], "memory");
    assert_eq!(body["details"]["index_cached"], false);

    get_json(&router, "/pokemon").await;
    let (_, body) = get_json(&router, "/health/ready").await;
    assert_eq!(body["details"]["index_cached"], true);
}

#[tokio::test]
async fn test_ready_with_unreachable_cache_is_503() {
    let (router, _) = test_router_with_cache(MockCatalog::new(), Arc::new(FailingCache::new()));

    let (status, body) = get_json(&router, "/health/ready").await;

    assert_eq!(status, 503);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["details"]["cache"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_search_with_unwritable_cache_still_answers() {
    let (router, catalog) =
        test_router_with_cache(starter_catalog(), Arc::new(FailingCache::new()));

    let (status, body) = get_json(&router, "/pokemon").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["count"], 5);

    get_json(&router, "/pokemon").await;
    assert_eq!(catalog.list_calls(), 2);
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let (router, _) = test_router(starter_catalog());
    get_json(&router, "/pokemon").await;

    let (status, body) = get_text(&router, "/metrics").await;

    assert_eq!(status, 200);
    assert!(body.contains("pokedex_http_requests_total"));
    assert!(body.contains("pokedex_index_cache_lookups_total"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (router, _) = test_router(MockCatalog::new());

    let (status, body) = get_json(&router, "/openapi.json").await;

    assert_eq!(status, 200);
    assert_eq!(body["info"]["title"], "Pokedex API");
    assert!(body["paths"].get("/pokemon").is_some());
}
