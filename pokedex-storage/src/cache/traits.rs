//! Cache backend trait and usage statistics.

use async_trait::async_trait;
use pokedex_core::CacheResult;

/// Shared key-value store with per-entry expiry.
///
/// This trait abstracts over different cache backends (Redis, in-memory).
/// Implementations must be thread-safe; nothing above them coordinates
/// concurrent readers and writers of the same key.
///
/// # Failure Contract
///
/// - `get` and `exists` never surface transport failures. The backend logs
///   the cause and answers as if the key were absent.
/// - `set` reports failures as [`CacheError`](pokedex_core::CacheError).
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Get the value stored under `key`, or `None` on miss or failure.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, expiring after `ttl_secs` seconds.
    ///
    /// A `ttl_secs` of zero stores the value without expiry.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()>;

    /// Whether `key` currently holds a live value. `false` on failure.
    async fn exists(&self, key: &str) -> bool;

    /// Round-trip to the backend, for readiness probes.
    async fn ping(&self) -> CacheResult<()>;

    /// Short backend label for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired entries).
    pub misses: u64,
    /// Number of successful writes.
    pub writes: u64,
    /// Number of entries currently held, expired ones included until touched.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }
}
