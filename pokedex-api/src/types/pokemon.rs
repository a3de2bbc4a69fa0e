//! Pokemon search and ability types

use pokedex_core::{AbilityRecord, SearchQuery, SearchResult, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

/// Query string of `GET /pokemon`.
///
/// Values are kept as raw strings so that malformed numbers fall back to the
/// defaults instead of rejecting the request. A repeated key keeps its first
/// value, and a canonical key wins over its alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchParams {
    /// 1-based page number (default 1)
    #[cfg_attr(feature = "openapi", param(example = "1"))]
    pub page: Option<String>,
    /// Page size (default 10)
    #[cfg_attr(feature = "openapi", param(example = "10"))]
    pub totalperpage: Option<String>,
    /// Alias of `totalperpage`
    #[cfg_attr(feature = "openapi", param(rename = "pageSize"))]
    pub page_size: Option<String>,
    /// Case-insensitive substring of the name
    #[cfg_attr(feature = "openapi", param(example = "pika"))]
    pub p: Option<String>,
    /// Alias of `p`
    pub term: Option<String>,
}

impl SearchParams {
    /// Collect the recognised keys from decoded query pairs.
    ///
    /// Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "totalperpage" => &mut params.totalperpage,
                "pageSize" => &mut params.page_size,
                "p" => &mut params.p,
                "term" => &mut params.term,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    pub fn to_query(&self) -> SearchQuery {
        let page_size = self.totalperpage.as_deref().or(self.page_size.as_deref());
        let term = self.p.as_ref().or(self.term.as_ref());
        SearchQuery::new(
            parse_positive(self.page.as_deref(), DEFAULT_PAGE),
            parse_positive(page_size, DEFAULT_PAGE_SIZE),
            term.cloned(),
        )
    }
}

/// Parse a positive integer, or fall back to `default`.
fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Query string of `GET /pokemon/ability`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AbilityParams {
    /// Pokemon name, matched case-insensitively
    #[cfg_attr(feature = "openapi", param(example = "pikachu"))]
    pub name: Option<String>,
}

impl AbilityParams {
    /// The trimmed name, or `None` when absent or blank.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

// ============================================================================
// SEARCH RESPONSE
// ============================================================================

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PokemonItem {
    /// Pokemon name as spelled by the catalog
    #[serde(rename = "Name")]
    #[cfg_attr(feature = "openapi", schema(example = "pikachu"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PokemonData {
    /// Number of matches across all pages
    pub count: usize,
    /// The requested page
    pub pokemons: Vec<PokemonItem>,
}

/// Response of `GET /pokemon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PokemonResponse {
    pub data: PokemonData,
}

impl From<SearchResult> for PokemonResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            data: PokemonData {
                count: result.total_count,
                pokemons: result
                    .items
                    .into_iter()
                    .map(|name| PokemonItem { name })
                    .collect(),
            },
        }
    }
}

// ============================================================================
// ABILITY RESPONSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AbilityItem {
    /// Ability identifier
    #[cfg_attr(feature = "openapi", schema(example = "static"))]
    pub ability: String,
    /// Whether this is a hidden ability
    pub hidden: bool,
}

impl From<AbilityRecord> for AbilityItem {
    fn from(record: AbilityRecord) -> Self {
        Self {
            ability: record.name,
            hidden: record.hidden,
        }
    }
}

/// Response of `GET /pokemon/ability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AbilityResponse {
    pub data: Vec<AbilityItem>,
}

impl From<Vec<AbilityRecord>> for AbilityResponse {
    fn from(records: Vec<AbilityRecord>) -> Self {
        Self {
            data: records.into_iter().map(AbilityItem::from).collect(),
        }
    }
}
