//! Trait seams between the engines and their collaborators.

pub mod bucket;
pub mod cache;
pub mod notifier;
