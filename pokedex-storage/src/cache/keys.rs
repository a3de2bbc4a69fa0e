//! Well-known cache keys.

/// Key holding the serialized, sorted name index.
pub const NAME_INDEX_KEY: &str = "pokemons:all";

/// Time-to-live of the name index: five days.
pub const NAME_INDEX_TTL_SECS: u64 = 5 * 24 * 60 * 60;
