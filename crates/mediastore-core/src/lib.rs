//! # mediastore-core
//!
//! Core crate for mediastore. Contains traits, configuration schemas,
//! domain events, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other mediastore crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
