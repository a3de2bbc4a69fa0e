//! Pokedex Storage - Key-Value Cache Layer
//!
//! Defines the cache abstraction the name index is mirrored into, with an
//! in-process backend for development and tests and a Redis backend for
//! shared deployments.

pub mod cache;

pub use cache::{
    CacheStats, InMemoryCache, KeyValueCache, RedisCache, RedisCacheConfig, NAME_INDEX_KEY,
    NAME_INDEX_TTL_SECS,
};
