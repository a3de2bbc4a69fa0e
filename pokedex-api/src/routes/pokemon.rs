//! Pokemon REST API Routes
//!
//! Search over the name index and per-pokemon ability lookups. Both
//! endpoints answer failures with a generic 400 envelope; the cause is only
//! logged.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    services::NameIndexService,
    state::AppState,
    types::{AbilityParams, AbilityResponse, PokemonResponse, SearchParams},
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /pokemon - Search names with pagination
#[utoipa::path(
    get,
    path = "/pokemon",
    tag = "Pokemon",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching names", body = PokemonResponse),
        (status = 400, description = "Query failed", body = ApiError),
    ),
)]
pub async fn search_pokemons(
    State(index): State<NameIndexService>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(pairs) = pairs.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let query = SearchParams::from_pairs(pairs).to_query();

    let result = index.search(&query).await?;
    Ok(Json(PokemonResponse::from(result)))
}

/// GET /pokemon/ability - Abilities of one pokemon
#[utoipa::path(
    get,
    path = "/pokemon/ability",
    tag = "Pokemon",
    params(AbilityParams),
    responses(
        (status = 200, description = "Abilities in catalog order", body = AbilityResponse),
        (status = 400, description = "Missing name or query failed", body = ApiError),
    ),
)]
pub async fn get_pokemon_abilities(
    State(index): State<NameIndexService>,
    params: Result<Query<AbilityParams>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let name = params.name().ok_or_else(|| ApiError::missing_field("name"))?;

    let abilities = index.abilities(name).await?;
    Ok(Json(AbilityResponse::from(abilities)))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the pokemon router, mounted at `/pokemon`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_pokemons))
        .route("/ability", get(get_pokemon_abilities))
}
