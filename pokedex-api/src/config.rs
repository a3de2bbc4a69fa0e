//! API Configuration Module
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then environment variables. Every layer is optional; a missing or
//! unreadable file is logged and skipped.
//!
//! ```yaml
//! pokeapi:
//!   baseUrl: https://pokeapi.co/api/v2
//!   timeout: 10000
//! redis:
//!   host: localhost
//!   port: 6379
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use pokedex_catalog::PokeApiConfig;
use pokedex_storage::{RedisCacheConfig, NAME_INDEX_KEY, NAME_INDEX_TTL_SECS};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::IndexSettings;

/// Config file consulted when `POKEDEX_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

// ============================================================================
// SECTIONS
// ============================================================================

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream catalog settings. `timeout` is in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PokeApiSection {
    #[serde(alias = "base_url")]
    pub base_url: String,
    pub timeout: u64,
}

impl Default for PokeApiSection {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisSection {
    pub host: String,
    pub port: u16,
}

impl Default for RedisSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
        }
    }
}

/// Which [`KeyValueCache`](pokedex_storage::KeyValueCache) backs the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" | "inmemory" => Ok(CacheBackend::Memory),
            other => Err(ApiError::invalid_input(format!(
                "Unknown cache backend '{}', expected 'redis' or 'memory'",
                other
            ))),
        }
    }
}

/// Name index cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheSection {
    pub backend: CacheBackend,
    #[serde(deserialize_with = "non_blank_key")]
    pub key: String,
    /// Index expiry in seconds; must be positive so the index always expires
    #[serde(alias = "ttl_secs", deserialize_with = "positive_ttl")]
    pub ttl_secs: u64,
}

fn non_blank_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    if key.trim().is_empty() {
        return Err(serde::de::Error::custom("cache key must not be blank"));
    }
    Ok(key)
}

fn positive_ttl<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ttl = u64::deserialize(deserializer)?;
    if ttl == 0 {
        return Err(serde::de::Error::custom("cache ttlSecs must be at least 1"));
    }
    Ok(ttl)
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            key: NAME_INDEX_KEY.to_string(),
            ttl_secs: NAME_INDEX_TTL_SECS,
        }
    }
}

/// CORS settings. Empty `origins` allows every origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            allow_credentials: false,
            max_age_secs: 86400,
        }
    }
}

impl CorsConfig {
    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.origins.is_empty() {
            return true;
        }

        self.origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // Wildcard subdomains: *.example.com
            if let Some(pattern) = allowed.strip_prefix("*.") {
                if let Some(origin_domain) = origin.strip_prefix("https://") {
                    return origin_domain.ends_with(&format!(".{}", pattern));
                }
            }
            false
        })
    }
}

// ============================================================================
// APP CONFIG
// ============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pokeapi: PokeApiSection,
    pub redis: RedisSection,
    pub cache: CacheSection,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from `POKEDEX_CONFIG` (or `config.yaml`) and the
    /// process environment.
    pub fn load() -> Self {
        let path = std::env::var("POKEDEX_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file_or_default(&path).with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a YAML document. Absent sections and fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Read `path`, falling back to defaults when it is missing or invalid.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file not loaded, using environment and defaults"
                );
                return Self::default();
            }
        };

        match Self::from_yaml_str(&contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file invalid, using environment and defaults"
                );
                Self::default()
            }
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Environment variables:
    /// - `POKEAPI_BASE_URL`, `POKEAPI_TIMEOUT` (milliseconds)
    /// - `REDIS_HOST`, `REDIS_PORT`
    /// - `POKEDEX_CACHE_BACKEND`: `redis` or `memory`
    /// - `POKEDEX_API_BIND`, `PORT` or `POKEDEX_API_PORT`
    /// - `POKEDEX_CORS_ORIGINS`: comma-separated allowed origins
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("POKEAPI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.pokeapi.base_url = url;
        }
        if let Some(timeout) = parse_env(&lookup, "POKEAPI_TIMEOUT") {
            self.pokeapi.timeout = timeout;
        }
        if let Some(host) = lookup("REDIS_HOST").filter(|v| !v.trim().is_empty()) {
            self.redis.host = host;
        }
        if let Some(port) = parse_env(&lookup, "REDIS_PORT") {
            self.redis.port = port;
        }
        if let Some(backend) = parse_env(&lookup, "POKEDEX_CACHE_BACKEND") {
            self.cache.backend = backend;
        }
        if let Some(bind) = lookup("POKEDEX_API_BIND").filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind;
        }
        let port = parse_env(&lookup, "PORT").or_else(|| parse_env(&lookup, "POKEDEX_API_PORT"));
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(origins) = lookup("POKEDEX_CORS_ORIGINS") {
            self.cors.origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        self
    }

    pub fn pokeapi_config(&self) -> PokeApiConfig {
        PokeApiConfig {
            base_url: self.pokeapi.base_url.clone(),
            timeout: Duration::from_millis(self.pokeapi.timeout),
        }
    }

    pub fn redis_config(&self) -> RedisCacheConfig {
        RedisCacheConfig {
            host: self.redis.host.clone(),
            port: self.redis.port,
            ..RedisCacheConfig::default()
        }
    }

    pub fn index_settings(&self) -> IndexSettings {
        IndexSettings {
            key: self.cache.key.clone(),
            ttl_secs: self.cache.ttl_secs,
        }
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.server.bind, self.server.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pokeapi.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.pokeapi.timeout, 10_000);
        assert_eq!(config.redis.host, "localhost");
        assert_eq!(config.redis.port, 6379);
        assert_eq!(config.cache.key, NAME_INDEX_KEY);
        assert_eq!(config.cache.ttl_secs, NAME_INDEX_TTL_SECS);
        assert_eq!(config.server.port, 3000);
        assert!(config.cors.origins.is_empty());
    }

    #[test]
    fn test_yaml_with_camel_case_keys() -> Result<(), serde_yaml::Error> {
        let config = AppConfig::from_yaml_str(
            "pokeapi:\n  baseUrl: http://mirror.local/api/v2\n  timeout: 2500\n\
             redis:\n  host: cache\n",
        )?;
        assert_eq!(config.pokeapi.base_url, "http://mirror.local/api/v2");
        assert_eq!(config.pokeapi.timeout, 2500);
        assert_eq!(config.redis.host, "cache");
        assert_eq!(config.redis.port, 6379);
        Ok(())
    }

    #[test]
    fn test_empty_yaml_is_default() -> Result<(), serde_yaml::Error> {
        assert_eq!(AppConfig::from_yaml_str("   \n")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = AppConfig::from_file_or_default("/definitely/not/here/config.yaml");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_file_is_read() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "cache:\n  backend: memory\n  ttlSecs: 60\nserver:\n  port: 8081\n")?;

        let config = AppConfig::from_file_or_default(&path);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.server.port, 8081);
        Ok(())
    }

    #[test]
    fn test_zero_ttl_or_blank_key_is_rejected() {
        let err = AppConfig::from_yaml_str("cache:\n  ttlSecs: 0\n").err();
        assert!(err.is_some_and(|e| e.to_string().contains("ttlSecs")));

        assert!(AppConfig::from_yaml_str("cache:\n  key: \"  \"\n").is_err());
        assert!(AppConfig::from_yaml_str("cache:\n  ttlSecs: 1\n").is_ok());
    }

    #[test]
    fn test_zero_ttl_file_falls_back_to_default_ttl() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "cache:\n  ttlSecs: 0\n")?;

        let config = AppConfig::from_file_or_default(&path);
        assert_eq!(config.cache.ttl_secs, NAME_INDEX_TTL_SECS);
        Ok(())
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "redis: [not, a, mapping")?;

        assert_eq!(AppConfig::from_file_or_default(&path), AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_env_overrides_file_values() -> Result<(), serde_yaml::Error> {
        let config = AppConfig::from_yaml_str("redis:\n  host: from-file\n  port: 7000\n")?
            .with_env_overrides(env(&[
                ("REDIS_HOST", "from-env"),
                ("POKEAPI_TIMEOUT", "1500"),
                ("POKEDEX_CACHE_BACKEND", "memory"),
                ("PORT", "8080"),
            ]));

        assert_eq!(config.redis.host, "from-env");
        assert_eq!(config.redis.port, 7000);
        assert_eq!(config.pokeapi.timeout, 1500);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.server.port, 8080);
        Ok(())
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = AppConfig::default().with_env_overrides(env(&[
            ("REDIS_PORT", "not-a-port"),
            ("POKEDEX_CACHE_BACKEND", "memcached"),
        ]));
        assert_eq!(config.redis.port, 6379);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
    }

    #[test]
    fn test_port_prefers_port_over_api_port() {
        let config = AppConfig::default().with_env_overrides(env(&[
            ("PORT", "4000"),
            ("POKEDEX_API_PORT", "5000"),
        ]));
        assert_eq!(config.server.port, 4000);

        let config = AppConfig::default().with_env_overrides(env(&[("POKEDEX_API_PORT", "5000")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_cors_origins_from_env() {
        let config = AppConfig::default().with_env_overrides(env(&[(
            "POKEDEX_CORS_ORIGINS",
            "https://pokedex.dev, ,https://app.pokedex.dev",
        )]));
        assert_eq!(
            config.cors.origins,
            vec!["https://pokedex.dev", "https://app.pokedex.dev"]
        );
    }

    #[test]
    fn test_origin_allowed() {
        let mut cors = CorsConfig::default();
        assert!(cors.is_origin_allowed("http://localhost:5173"));

        cors.origins = vec!["https://pokedex.dev".to_string(), "*.pokedex.dev".to_string()];
        assert!(cors.is_origin_allowed("https://pokedex.dev"));
        assert!(cors.is_origin_allowed("https://app.pokedex.dev"));
        assert!(!cors.is_origin_allowed("https://evil.com"));
        assert!(!cors.is_origin_allowed("https://notpokedex.dev"));
    }

    #[test]
    fn test_derived_client_configs() -> ApiResult<()> {
        let config = AppConfig::default();
        assert_eq!(config.pokeapi_config().timeout, Duration::from_millis(10_000));
        assert_eq!(config.redis_config().url(), "redis://localhost:6379/");
        assert_eq!(config.index_settings().ttl_secs, NAME_INDEX_TTL_SECS);
        assert_eq!(config.bind_addr()?.port(), 3000);
        Ok(())
    }
}
