//! Pokedex API - REST Layer over the Cached Name Index
//!
//! This crate exposes case-insensitive, paginated search over the PokeAPI
//! name index and per-Pokemon ability lookups. The full name list is held
//! in a key-value cache (Redis or in-process) and refilled from PokeAPI on
//! a miss.

pub mod config;
pub mod error;
mod macros;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod types;

use std::sync::Arc;

use pokedex_catalog::{CatalogClient, PokeApiClient};
use pokedex_storage::{InMemoryCache, KeyValueCache, RedisCache};

// Re-export commonly used types
pub use config::{AppConfig, CacheBackend, CorsConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::{IndexSettings, NameIndexService};
pub use state::AppState;
pub use types::*;

/// Wire the catalog client and cache backend described by `config`.
///
/// An unreachable Redis is reported as [`ErrorCode::ServiceUnavailable`].
pub async fn build_state(config: &AppConfig) -> ApiResult<AppState> {
    let catalog: Arc<dyn CatalogClient> = Arc::new(
        PokeApiClient::new(&config.pokeapi_config()).map_err(|e| {
            ApiError::internal_error(format!("Failed to build PokeAPI client: {}", e))
        })?,
    );

    let cache: Arc<dyn KeyValueCache> = match config.cache.backend {
        CacheBackend::Redis => {
            let redis_config = config.redis_config();
            let cache = RedisCache::connect(&redis_config).await.map_err(|e| {
                ApiError::service_unavailable(format!(
                    "Failed to connect to Redis at {}: {}",
                    redis_config.url(),
                    e
                ))
            })?;
            Arc::new(cache)
        }
        CacheBackend::Memory => {
            tracing::warn!(
                "Using in-process cache; the name index is not shared between instances"
            );
            Arc::new(InMemoryCache::new())
        }
    };

    tracing::info!(
        backend = cache.backend_name(),
        catalog = catalog.provider_id(),
        "Cache and catalog ready"
    );

    let index =
        NameIndexService::new(catalog, Arc::clone(&cache)).with_settings(config.index_settings());
    Ok(AppState::new(index, cache))
}
