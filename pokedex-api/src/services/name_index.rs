//! Name Index Service
//!
//! Cache-aside front for the upstream catalog. The full list of names is
//! mirrored into a [`KeyValueCache`] under one key; every search reads it,
//! filters, sorts and pages it in memory.
//!
//! Concurrent misses are not coalesced. Each one fetches the listing and
//! overwrites the cache entry with the same payload.

use std::sync::Arc;
use std::time::Instant;

use pokedex_catalog::CatalogClient;
use pokedex_core::{
    dedup_names, filter_names, paginate, sort_names, AbilityRecord, CatalogItemName,
    IndexError, PokedexResult, QueryFailed, SearchQuery, SearchResult,
};
use pokedex_storage::{KeyValueCache, NAME_INDEX_KEY, NAME_INDEX_TTL_SECS};

use crate::telemetry::registered_metrics;

/// Where the name index lives in the cache and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    pub key: String,
    /// Expiry of a freshly written index, in seconds
    pub ttl_secs: u64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            key: NAME_INDEX_KEY.to_string(),
            ttl_secs: NAME_INDEX_TTL_SECS,
        }
    }
}

/// Search and detail lookups over the catalog.
#[derive(Clone)]
pub struct NameIndexService {
    catalog: Arc<dyn CatalogClient>,
    cache: Arc<dyn KeyValueCache>,
    settings: IndexSettings,
}

impl NameIndexService {
    pub fn new(catalog: Arc<dyn CatalogClient>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            catalog,
            cache,
            settings: IndexSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: IndexSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Whether the index is currently present in the cache.
    pub async fn is_index_cached(&self) -> bool {
        self.cache.exists(&self.settings.key).await
    }

    // ========================================================================
    // BOUNDARY
    // ========================================================================

    /// Search the name index.
    ///
    /// Failures are logged here and reported as [`QueryFailed`].
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, QueryFailed> {
        self.try_search(query).await.map_err(|err| {
            tracing::error!(
                error = %err,
                page = query.page,
                page_size = query.page_size,
                "Name search failed"
            );
            QueryFailed
        })
    }

    /// Abilities of one catalog item, in upstream order.
    ///
    /// Failures, including an unknown name, are logged here and reported as
    /// [`QueryFailed`].
    pub async fn abilities(&self, name: &str) -> Result<Vec<AbilityRecord>, QueryFailed> {
        self.try_abilities(name).await.map_err(|err| {
            tracing::error!(
                error = %err,
                pokemon = name,
                not_found = err.is_not_found(),
                "Ability lookup failed"
            );
            QueryFailed
        })
    }

    // ========================================================================
    // TYPED OPERATIONS
    // ========================================================================

    pub async fn try_search(&self, query: &SearchQuery) -> PokedexResult<SearchResult> {
        let names = self.load_index().await?;

        let term = query.normalized_term();
        let mut matched = filter_names(&names, term.as_deref());
        sort_names(&mut matched);

        let total_count = matched.len();
        let items = paginate(&matched, query.page, query.page_size);

        tracing::debug!(
            term = term.as_deref().unwrap_or(""),
            total_count,
            returned = items.len(),
            "Name search served"
        );

        Ok(SearchResult { total_count, items })
    }

    pub async fn try_abilities(&self, name: &str) -> PokedexResult<Vec<AbilityRecord>> {
        let start = Instant::now();
        let result = self.catalog.fetch_abilities(name).await;
        record_upstream("detail", result.is_ok(), start);
        Ok(result?)
    }

    // ========================================================================
    // CACHE-ASIDE
    // ========================================================================

    /// The full sorted index, from the cache when it holds a non-empty one.
    async fn load_index(&self) -> PokedexResult<Vec<CatalogItemName>> {
        if let Some(mut names) = self.read_cached().await? {
            if !names.is_empty() {
                record_lookup(true);
                sort_names(&mut names);
                return Ok(names);
            }
        }

        record_lookup(false);
        self.fill_index().await
    }

    /// Decode the cached payload. A present but malformed payload is an error.
    async fn read_cached(&self) -> PokedexResult<Option<Vec<CatalogItemName>>> {
        let Some(payload) = self.cache.get(&self.settings.key).await else {
            return Ok(None);
        };

        let names = serde_json::from_str::<Vec<CatalogItemName>>(&payload).map_err(|e| {
            IndexError::Decode {
                key: self.settings.key.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(names))
    }

    /// Fetch the listing, sort it and write it back.
    ///
    /// A failed write is logged; the fetched names are returned regardless.
    async fn fill_index(&self) -> PokedexResult<Vec<CatalogItemName>> {
        let start = Instant::now();
        let fetched = self.catalog.fetch_all_names().await;
        record_upstream("list", fetched.is_ok(), start);

        let mut names = dedup_names(fetched?);
        sort_names(&mut names);

        match self.write_index(&names).await {
            Ok(()) => {
                record_fill(true);
                tracing::info!(
                    key = %self.settings.key,
                    count = names.len(),
                    provider = self.catalog.provider_id(),
                    cache = self.cache.backend_name(),
                    "Name index cached"
                );
            }
            Err(err) => {
                record_fill(false);
                tracing::warn!(
                    key = %self.settings.key,
                    error = %err,
                    "Failed to cache name index"
                );
            }
        }

        Ok(names)
    }

    async fn write_index(&self, names: &[CatalogItemName]) -> PokedexResult<()> {
        let payload = serde_json::to_string(names).map_err(|e| IndexError::Encode {
            reason: e.to_string(),
        })?;
        self.cache
            .set(&self.settings.key, &payload, self.settings.ttl_secs)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for NameIndexService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameIndexService")
            .field("catalog", &self.catalog.provider_id())
            .field("cache", &self.cache.backend_name())
            .field("settings", &self.settings)
            .finish()
    }
}

fn record_lookup(hit: bool) {
    if let Some(m) = registered_metrics() {
        m.record_index_lookup(hit);
    }
}

fn record_fill(success: bool) {
    if let Some(m) = registered_metrics() {
        m.record_index_fill(success);
    }
}

fn record_upstream(operation: &str, success: bool, start: Instant) {
    if let Some(m) = registered_metrics() {
        m.record_upstream_request(operation, success, start.elapsed().as_secs_f64());
    }
}
