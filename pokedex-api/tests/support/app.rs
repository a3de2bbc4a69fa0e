//! Router fixtures shared by the HTTP tests.

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use pokedex_api::{create_api_router, AppState, CorsConfig, NameIndexService};
use pokedex_storage::KeyValueCache;
use pokedex_test_utils::{InMemoryCache, MockCatalog};
use tower::ServiceExt;

/// Router over `catalog` with a fresh in-memory cache.
pub fn test_router(catalog: MockCatalog) -> (Router, Arc<MockCatalog>) {
    test_router_with_cache(catalog, Arc::new(InMemoryCache::new()))
}

pub fn test_router_with_cache(
    catalog: MockCatalog,
    cache: Arc<dyn KeyValueCache>,
) -> (Router, Arc<MockCatalog>) {
    let catalog = Arc::new(catalog);
    let index = NameIndexService::new(catalog.clone(), Arc::clone(&cache));
    let router = create_api_router(AppState::new(index, cache), &CorsConfig::default());
    (router, catalog)
}

/// Issue `GET uri` and return the status with the body parsed as JSON.
pub async fn get_json(router: &Router, uri: &str) -> (u16, serde_json::Value) {
    let (status, body) = get_text(router, uri).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("Body of {} is not JSON ({}): {}", uri, e, body));
    (status, json)
}

pub async fn get_text(router: &Router, uri: &str) -> (u16, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
