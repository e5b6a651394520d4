//! In-memory object store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use mediastore_core::error::AppError;
use mediastore_core::result::AppResult;
use mediastore_core::traits::bucket::{BucketStore, ObjectAttrs};

use crate::archive::build_zip;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Object store backed by a process-local map. Keyed by
/// `(bucket, path)`; buckets need no provisioning.
#[derive(Debug, Default)]
pub struct MemoryBucketStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object directly, as if it had been uploaded.
    pub async fn put(&self, bucket: &str, path: &str, data: Vec<u8>, content_type: Option<&str>) {
        let mut objects = self.objects.write().await;
        objects.insert(
            (bucket.to_string(), path.to_string()),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
                updated_at: Utc::now(),
            },
        );
    }

    /// Read an object's raw bytes.
    pub async fn read(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>> {
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), path.to_string()))
            .map(|o| o.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Object {bucket}/{path} not found")))
    }

    /// Number of stored objects across all buckets.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    fn attrs(bucket: &str, path: &str, object: &StoredObject) -> ObjectAttrs {
        ObjectAttrs {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size_bytes: object.data.len() as i64,
            content_type: object.content_type.clone(),
            media_link: format!("memory://{bucket}/{path}"),
            updated_at: Some(object.updated_at),
        }
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn get_attrs(&self, bucket: &str, path: &str) -> AppResult<ObjectAttrs> {
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), path.to_string()))
            .map(|o| Self::attrs(bucket, path, o))
            .ok_or_else(|| AppError::not_found(format!("Object {bucket}/{path} not found")))
    }

    async fn move_object(
        &self,
        src_bucket: &str,
        src_path: &str,
        dst_bucket: &str,
        dst_path: &str,
    ) -> AppResult<ObjectAttrs> {
        let mut objects = self.objects.write().await;
        let dst_key = (dst_bucket.to_string(), dst_path.to_string());
        if objects.contains_key(&dst_key) {
            return Err(AppError::already_exists(format!(
                "Object {dst_bucket}/{dst_path} already exists"
            )));
        }
        let object = objects
            .remove(&(src_bucket.to_string(), src_path.to_string()))
            .ok_or_else(|| {
                AppError::not_found(format!("Object {src_bucket}/{src_path} not found"))
            })?;
        let attrs = Self::attrs(dst_bucket, dst_path, &object);
        objects.insert(dst_key, object);
        Ok(attrs)
    }

    async fn delete(&self, bucket: &str, path: &str) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        objects.remove(&(bucket.to_string(), path.to_string()));
        Ok(())
    }

    async fn compress_objects(
        &self,
        dst_bucket: &str,
        dst_path: &str,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<()> {
        let entries: AppResult<Vec<(String, Vec<u8>)>> = {
            let objects = self.objects.read().await;
            src_paths
                .iter()
                .map(|path| {
                    objects
                        .get(&(src_bucket.to_string(), path.to_string()))
                        .map(|o| (path.clone(), o.data.clone()))
                        .ok_or_else(|| {
                            AppError::not_found(format!("Object {src_bucket}/{path} not found"))
                        })
                })
                .collect()
        };
        let data = build_zip(&entries?)?;
        self.put(dst_bucket, dst_path, data, Some("application/zip"))
            .await;
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, path: &str, expiry: Duration) -> AppResult<String> {
        if !self.exists(bucket, path).await? {
            return Err(AppError::not_found(format!(
                "Object {bucket}/{path} not found"
            )));
        }
        let expires_at = Utc::now() + expiry;
        Ok(format!(
            "memory://{bucket}/{path}?expires_at={}",
            expires_at.to_rfc3339()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediastore_core::error::ErrorKind;

    #[tokio::test]
    async fn test_get_attrs_missing_is_not_found() {
        let store = MemoryBucketStore::new();
        let err = store.get_attrs("media", "nope").await.unwrap_err();
        assert!(err.is_kind(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_move_object_refuses_occupied_destination() {
        let store = MemoryBucketStore::new();
        store.put("tmp", "a", b"src".to_vec(), None).await;
        store.put("media", "b", b"dst".to_vec(), None).await;

        let err = store.move_object("tmp", "a", "media", "b").await.unwrap_err();
        assert!(err.is_kind(ErrorKind::AlreadyExists));

        // Source untouched, destination unchanged.
        assert_eq!(store.read("tmp", "a").await.unwrap(), b"src");
        assert_eq!(store.read("media", "b").await.unwrap(), b"dst");
    }

    #[tokio::test]
    async fn test_move_object_relocates_content() {
        let store = MemoryBucketStore::new();
        store
            .put("tmp", "upload.bin", b"payload".to_vec(), Some("video/mp4"))
            .await;

        let attrs = store
            .move_object("tmp", "upload.bin", "media", "files/1/upload.bin")
            .await
            .unwrap();
        assert_eq!(attrs.size_bytes, 7);
        assert_eq!(attrs.content_type.as_deref(), Some("video/mp4"));

        assert!(!store.exists("tmp", "upload.bin").await.unwrap());
        assert_eq!(
            store.read("media", "files/1/upload.bin").await.unwrap(),
            b"payload"
        );
    }

    #[tokio::test]
    async fn test_compress_objects_writes_zip() {
        let store = MemoryBucketStore::new();
        store.put("media", "a.wav", b"aaaa".to_vec(), None).await;
        store.put("media", "b.wav", b"bbbb".to_vec(), None).await;

        store
            .compress_objects(
                "tmp",
                "compress/out.zip",
                "media",
                &["a.wav".to_string(), "b.wav".to_string()],
            )
            .await
            .unwrap();

        let attrs = store.get_attrs("tmp", "compress/out.zip").await.unwrap();
        assert_eq!(attrs.content_type.as_deref(), Some("application/zip"));

        let data = store.read("tmp", "compress/out.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[tokio::test]
    async fn test_compress_objects_missing_source_fails() {
        let store = MemoryBucketStore::new();
        store.put("media", "a.wav", b"aaaa".to_vec(), None).await;

        let err = store
            .compress_objects(
                "tmp",
                "compress/out.zip",
                "media",
                &["a.wav".to_string(), "missing.wav".to_string()],
            )
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::NotFound));
        assert!(!store.exists("tmp", "compress/out.zip").await.unwrap());
    }

    #[tokio::test]
    async fn test_signed_url_carries_expiry() {
        let store = MemoryBucketStore::new();
        store.put("media", "f", b"x".to_vec(), None).await;

        let url = store
            .signed_url("media", "f", Duration::hours(24))
            .await
            .unwrap();
        assert!(url.starts_with("memory://media/f?expires_at="));
    }
}
