//! Redis-backed cache implementation.
//!
//! Uses a [`ConnectionManager`], which multiplexes one connection across
//! clones and reconnects transparently after a dropped link. Commands map
//! one to one onto the [`KeyValueCache`] contract: `GET`, `SETEX` (or `SET`
//! without expiry), `EXISTS`, `PING`.

use std::time::Duration;

use async_trait::async_trait;
use pokedex_core::{CacheError, CacheResult};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::traits::KeyValueCache;

/// Connection settings for [`RedisCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisCacheConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on establishing the initial connection.
    pub connect_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCacheConfig {
    /// Connection URL understood by the redis client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

/// [`KeyValueCache`] over a shared Redis instance.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
    url: String,
}

impl RedisCache {
    /// Connect to Redis.
    ///
    /// Fails if the server cannot be reached within `connect_timeout`.
    pub async fn connect(config: &RedisCacheConfig) -> CacheResult<Self> {
        let url = config.url();
        tracing::info!(%url, "Connecting to Redis");

        let client = redis::Client::open(url.as_str()).map_err(unavailable)?;
        let manager = tokio::time::timeout(config.connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| CacheError::Unavailable {
                reason: format!("connect to {} timed out after {:?}", url, config.connect_timeout),
            })?
            .map_err(unavailable)?;

        tracing::info!(%url, "Connected to Redis");
        Ok(Self { manager, url })
    }

    /// The URL this cache is connected to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn unavailable(err: redis::RedisError) -> CacheError {
    CacheError::Unavailable {
        reason: err.to_string(),
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.manager.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Redis GET failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let result = if ttl_secs > 0 {
            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
        } else {
            conn.set::<_, _, ()>(key, value).await
        };

        result.map_err(|err| CacheError::WriteFailed {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }

    async fn exists(&self, key: &str) -> bool {
        let mut conn = self.manager.clone();
        match conn.exists::<_, bool>(key).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(key, error = %err, "Redis EXISTS failed, treating as absent");
                false
            }
        }
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").field("url", &self.url).finish()
    }
}
