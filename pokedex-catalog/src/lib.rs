//! Pokedex Catalog - External Catalog Access
//!
//! Provider-agnostic trait for the upstream creature catalog, plus the
//! PokeAPI implementation. This layer is pure transport: it neither caches
//! nor retries.

use async_trait::async_trait;
use pokedex_core::{AbilityRecord, CatalogItemName, CatalogResult};

pub mod providers;

pub use providers::{PokeApiClient, PokeApiConfig};

// ============================================================================
// CATALOG CLIENT TRAIT
// ============================================================================

/// Trait for upstream catalog providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// let client = PokeApiClient::new(PokeApiConfig::default())?;
/// let names = client.fetch_all_names().await?;
/// let abilities = client.fetch_abilities("Pikachu").await?;
/// ```
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full listing of item names, in upstream order.
    ///
    /// # Returns
    /// * `Ok(Vec<CatalogItemName>)` - Every known name
    /// * `Err(CatalogError::Upstream)` - Network failure, timeout, or non-success status
    async fn fetch_all_names(&self) -> CatalogResult<Vec<CatalogItemName>>;

    /// Fetch the abilities of one item, in upstream order.
    ///
    /// The name is matched case-insensitively.
    ///
    /// # Returns
    /// * `Ok(Vec<AbilityRecord>)` - The item's abilities
    /// * `Err(CatalogError::NotFound)` - The catalog has no such item
    /// * `Err(CatalogError::Upstream)` - Any other transport or status failure
    async fn fetch_abilities(&self, name: &str) -> CatalogResult<Vec<AbilityRecord>>;

    /// Provider label for logs.
    fn provider_id(&self) -> &str;
}
