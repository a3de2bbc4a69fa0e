//! PokeAPI response types

use pokedex_core::AbilityRecord;
use serde::Deserialize;

// ============================================================================
// LISTING TYPES
// ============================================================================

/// `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonListResponse {
    #[serde(default)]
    pub count: u64,
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// DETAIL TYPES
// ============================================================================

/// `GET /pokemon/{name}`, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetailResponse {
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: Option<u32>,
}

impl From<AbilitySlot> for AbilityRecord {
    fn from(slot: AbilitySlot) -> Self {
        AbilityRecord::new(slot.ability.name, slot.is_hidden)
    }
}
