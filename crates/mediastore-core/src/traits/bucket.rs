//! Object-store trait for pluggable bucket backends.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::result::AppResult;

/// Attributes of a stored object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ObjectAttrs {
    /// Bucket holding the object.
    pub bucket: String,
    /// Path within the bucket.
    pub path: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type (if known).
    pub content_type: Option<String>,
    /// Direct (unsigned) media link for the object.
    pub media_link: String,
    /// Last modified timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Trait for object-store backends.
///
/// The engine treats the object store as append-mostly: objects are
/// written once, moved once, and deleted once, never updated in place.
/// Implementations exist for S3-compatible stores and an in-memory
/// backend used in development and tests.
#[async_trait]
pub trait BucketStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch attributes of an object. Fails with `NotFound` when the
    /// object does not exist.
    async fn get_attrs(&self, bucket: &str, path: &str) -> AppResult<ObjectAttrs>;

    /// Check whether an object exists at the given path.
    async fn exists(&self, bucket: &str, path: &str) -> AppResult<bool> {
        match self.get_attrs(bucket, path).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_kind(crate::error::ErrorKind::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Move an object: server-side copy, then delete the source.
    ///
    /// Fails with `NotFound` when the source is absent and with
    /// `AlreadyExists` when the destination is occupied; an existing
    /// destination is never overwritten. A source-delete failure is
    /// logged but does not fail the move; the destination copy is
    /// authoritative.
    async fn move_object(
        &self,
        src_bucket: &str,
        src_path: &str,
        dst_bucket: &str,
        dst_path: &str,
    ) -> AppResult<ObjectAttrs>;

    /// Delete an object.
    async fn delete(&self, bucket: &str, path: &str) -> AppResult<()>;

    /// Stream the source objects into a single zip archive written to
    /// `dst_path`. On any failure the partially written destination
    /// object is deleted before the error is returned.
    async fn compress_objects(
        &self,
        dst_bucket: &str,
        dst_path: &str,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<()>;

    /// Issue a time-boxed signed download URL for an object. The
    /// signing mechanism is opaque to callers.
    async fn signed_url(&self, bucket: &str, path: &str, expiry: Duration) -> AppResult<String>;
}
