//! Config-driven cache provider selection.

use std::sync::Arc;

use mediastore_core::config::cache::CacheConfig;
use mediastore_core::error::AppError;
use mediastore_core::result::AppResult;
use mediastore_core::traits::cache::CacheProvider;

use crate::memory::MemoryCacheProvider;
use crate::redis::{RedisCacheProvider, RedisClient};

/// Build the cache provider named by the configuration.
pub async fn build_cache_provider(config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    match config.provider.as_str() {
        "redis" => {
            let client = RedisClient::connect(&config.redis).await?;
            Ok(Arc::new(RedisCacheProvider::new(
                client,
                config.default_ttl_seconds,
            )))
        }
        "memory" => Ok(Arc::new(MemoryCacheProvider::new(
            &config.memory,
            config.default_ttl_seconds,
        ))),
        other => Err(AppError::configuration(format!(
            "unknown cache provider '{other}'"
        ))),
    }
}
