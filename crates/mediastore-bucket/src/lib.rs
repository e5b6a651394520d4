//! # mediastore-bucket
//!
//! Object-store backends behind the [`BucketStore`] seam: an
//! S3-compatible client for production and an in-memory store for
//! development and tests.
//!
//! [`BucketStore`]: mediastore_core::traits::bucket::BucketStore

pub mod archive;
pub mod memory;
pub mod s3;

pub use memory::MemoryBucketStore;
pub use s3::S3BucketStore;
