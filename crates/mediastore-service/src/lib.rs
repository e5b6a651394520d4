//! # mediastore-service
//!
//! Storage engines for the media platform. Each engine orchestrates
//! the durable store, the cache-fronted repositories, the object store,
//! and the event notifier to implement application-level use cases.
//!
//! Engines follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, with trait seams so tests
//! can substitute in-memory fakes.

pub mod account;
pub mod customer;
pub mod file;

pub use account::AccountEngine;
pub use customer::CustomerLifecycleHandler;
pub use file::{CreateFileRequest, DownloadUri, FileEngine, RecordingBundle};
