//! Cache-aside repository implementations.
//!
//! Reads try the cache first and fall back to PostgreSQL, populating
//! the cache on the way out. Mutations hit PostgreSQL first and cache
//! the canonical row the database returned, never the caller's input.
//! Cache failures degrade to durable reads; they are logged, not
//! propagated.

pub mod account;
pub mod file;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use mediastore_core::traits::cache::CacheProvider;

pub use account::AccountRepository;
pub use file::FileRepository;

/// Best-effort cache read; any cache or decode failure counts as a miss.
pub(crate) async fn cache_read<T: DeserializeOwned>(
    cache: &Arc<dyn CacheProvider>,
    key: &str,
) -> Option<T> {
    match cache.get(key).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
        Ok(None) => None,
        Err(e) => {
            debug!(key, error = %e, "Cache read failed, falling back to database");
            None
        }
    }
}

/// Best-effort cache write of a row re-read from durable storage.
pub(crate) async fn cache_write<T: Serialize>(
    cache: &Arc<dyn CacheProvider>,
    key: &str,
    value: &T,
) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = cache.set_default(key, &raw).await {
                warn!(key, error = %e, "Cache write failed");
            }
        }
        Err(e) => warn!(key, error = %e, "Cache serialization failed"),
    }
}
