//! Storage-account engine.

pub mod service;

pub use service::AccountEngine;
