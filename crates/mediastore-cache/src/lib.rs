//! # mediastore-cache
//!
//! Cache backends for the storage engine's cache-aside repositories,
//! plus the redis pub/sub domain-event notifier.
//!
//! The cache holds derived state only: repositories always refresh an
//! entry from durable storage before writing it here.

pub mod keys;
pub mod memory;
pub mod notifier;
pub mod provider;
pub mod redis;

pub use provider::build_cache_provider;
