//! PokeAPI HTTP client

use super::types::{PokemonDetailResponse, PokemonListResponse};
use crate::CatalogClient;
use async_trait::async_trait;
use pokedex_core::{AbilityRecord, CatalogError, CatalogItemName, CatalogResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const PROVIDER: &str = "pokeapi";

/// Upper bound on the listing size; large enough to return every entry.
const LISTING_LIMIT: u32 = 100_000;

/// Connection settings for [`PokeApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokeApiConfig {
    /// Base URL including the API version (no trailing slash required).
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// Stateless PokeAPI client.
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a new PokeAPI client.
    pub fn new(config: &PokeApiConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                let reason = format!("Failed to build HTTP client: {}", e);
                CatalogError::upstream("client", None, reason)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against a specific base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> CatalogResult<Self> {
        Self::new(&PokeApiConfig {
            base_url: base_url.into(),
            ..PokeApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body.
    ///
    /// `Ok(None)` means the upstream answered 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> CatalogResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CatalogError::upstream(operation, Some(status.as_u16()), error_text));
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| {
                let reason = format!("Failed to parse response: {}", e);
                CatalogError::upstream(operation, Some(status.as_u16()), reason)
            })
    }
}

fn transport_error(operation: &str, err: &reqwest::Error) -> CatalogError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        format!("HTTP request failed: {}", err)
    };
    CatalogError::upstream(operation, err.status().map(|s| s.as_u16()), reason)
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn fetch_all_names(&self) -> CatalogResult<Vec<CatalogItemName>> {
        let path = format!("/pokemon?limit={}&offset=0", LISTING_LIMIT);
        let listing: PokemonListResponse = self
            .get_json("list", &path)
            .await?
            .ok_or_else(|| {
                CatalogError::upstream("list", Some(404), "Listing endpoint not found")
            })?;

        tracing::debug!(
            provider = PROVIDER,
            reported = listing.count,
            received = listing.results.len(),
            "Fetched catalog listing"
        );

        Ok(listing.results.into_iter().map(|r| r.name).collect())
    }

    async fn fetch_abilities(&self, name: &str) -> CatalogResult<Vec<AbilityRecord>> {
        let lowered = name.to_lowercase();
        let path = format!("/pokemon/{}", urlencoding::encode(&lowered));
        let detail: PokemonDetailResponse = self
            .get_json("detail", &path)
            .await?
            .ok_or_else(|| CatalogError::not_found(name))?;

        Ok(detail.abilities.into_iter().map(AbilityRecord::from).collect())
    }

    fn provider_id(&self) -> &str {
        PROVIDER
    }
}

impl std::fmt::Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
