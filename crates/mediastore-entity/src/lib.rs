//! # mediastore-entity
//!
//! Domain entity models for mediastore: files, accounts, and the
//! soft-delete timestamp convention they share.

pub mod account;
pub mod file;
pub mod time;
