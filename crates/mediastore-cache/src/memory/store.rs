//! In-memory cache implementation using the moka crate.
//!
//! Used for development and single-node deployments; production runs
//! against Redis.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use mediastore_core::config::cache::MemoryCacheConfig;
use mediastore_core::result::AppResult;
use mediastore_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let default_ttl = Duration::from_secs(default_ttl_seconds);
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(default_ttl)
            .build();

        Self { cache, default_ttl }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        // moka applies the builder-level TTL; per-entry TTLs are not
        // supported, which is acceptable for a dev backend.
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediastore_core::traits::cache::CacheProvider;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 }, 60)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache.set_default("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert!(cache.exists("k").await.unwrap());

        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = provider();
        cache.set_json("n", &42u32).await.unwrap();
        assert_eq!(cache.get_json::<u32>("n").await.unwrap(), Some(42));
    }
}
