//! # mediastore-database
//!
//! PostgreSQL connection management, schema migrations, and the
//! cache-aside repositories behind the engine's store seams.
//!
//! The durable store is the single source of truth; the cache only
//! ever holds rows re-read from it after a committed write.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{AccountStore, FileStore};
