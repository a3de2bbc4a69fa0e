//! Key-value cache with expiry.
//!
//! The contract is asymmetric: reads never fail (a backend that cannot
//! answer logs the cause and reports a miss), while writes return a
//! [`CacheResult`](pokedex_core::CacheResult) so the caller decides whether
//! a failed warm-up matters.
//!
//! # Example
//!
//! ```ignore
//! let cache = InMemoryCache::new();
//! cache.set(NAME_INDEX_KEY, "[\"pikachu\"]", NAME_INDEX_TTL_SECS).await?;
//! assert!(cache.exists(NAME_INDEX_KEY).await);
//! ```

pub mod keys;
pub mod memory;
pub mod redis_backend;
pub mod traits;

pub use keys::{NAME_INDEX_KEY, NAME_INDEX_TTL_SECS};
pub use memory::InMemoryCache;
pub use redis_backend::{RedisCache, RedisCacheConfig};
pub use traits::{CacheStats, KeyValueCache};
