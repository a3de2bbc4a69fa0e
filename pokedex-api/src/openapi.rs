//! OpenAPI Document for the Pokedex API
//!
//! Generated by utoipa from the wire types and route annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{health, pokemon};
use crate::telemetry::metrics;
use crate::types::*;

/// OpenAPI document for the Pokedex API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pokedex API",
        version = "0.1.0",
        description = "Paginated, case-insensitive PokeAPI name search and ability lookups",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Pokemon", description = "Name search and ability lookups"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        pokemon::search_pokemons,
        pokemon::get_pokemon_abilities,
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(schemas(
        PokemonResponse,
        PokemonData,
        PokemonItem,
        AbilityResponse,
        AbilityItem,
        ApiError,
        ErrorCode,
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }

    /// Generate OpenAPI spec as YAML string.
    #[cfg(feature = "openapi")]
    pub fn to_yaml() -> Result<String, String> {
        let openapi = Self::openapi();
        serde_yaml::to_string(&openapi).map_err(|e| e.to_string())
    }
}
