//! S3-compatible object-store backend.

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use mediastore_core::config::bucket::BucketConfig;
use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::result::AppResult;
use mediastore_core::traits::bucket::{BucketStore, ObjectAttrs};

use crate::archive::build_zip;

/// SigV4 presigned URLs are valid for at most one week; longer
/// requests are clamped to this.
const MAX_PRESIGN: i64 = 7 * 24 * 3600;

/// Object-store backend for S3 and S3-compatible services (MinIO).
#[derive(Debug, Clone)]
pub struct S3BucketStore {
    client: Client,
    endpoint: String,
    region: String,
}

impl S3BucketStore {
    /// Build a client from the bucket configuration. Empty credentials
    /// fall back to the ambient identity chain.
    pub async fn connect(config: &BucketConfig) -> AppResult<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
                &config.access_key,
                &config.secret_key,
                None,
                None,
                "mediastore",
            ));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if !config.endpoint.is_empty() {
            // MinIO and friends do not support virtual-hosted bucket
            // addressing.
            builder = builder.force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
        })
    }

    fn media_link(&self, bucket: &str, path: &str) -> String {
        if self.endpoint.is_empty() {
            format!(
                "https://{bucket}.s3.{region}.amazonaws.com/{path}",
                region = self.region
            )
        } else {
            format!("{endpoint}/{bucket}/{path}", endpoint = self.endpoint)
        }
    }

    async fn fetch_object(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    AppError::not_found(format!("Object {bucket}/{path} not found"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read object {bucket}/{path}"),
                        service,
                    )
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read object body {bucket}/{path}"),
                e,
            )
        })?;
        Ok(data.into_bytes().to_vec())
    }

    async fn upload_archive(
        &self,
        dst_bucket: &str,
        dst_path: &str,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<()> {
        let mut entries = Vec::with_capacity(src_paths.len());
        for path in src_paths {
            let content = self.fetch_object(src_bucket, path).await?;
            entries.push((path.clone(), content));
        }
        let data = build_zip(&entries)?;

        self.client
            .put_object()
            .bucket(dst_bucket)
            .key(dst_path)
            .content_type("application/zip")
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to upload archive {dst_bucket}/{dst_path}"),
                    e.into_service_error(),
                )
            })?;
        Ok(())
    }
}

fn smithy_time(t: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(t.secs(), t.subsec_nanos())
}

#[async_trait]
impl BucketStore for S3BucketStore {
    async fn get_attrs(&self, bucket: &str, path: &str) -> AppResult<ObjectAttrs> {
        let head = self
            .client
            .head_object()
            .bucket(bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_not_found() {
                    AppError::not_found(format!("Object {bucket}/{path} not found"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to stat object {bucket}/{path}"),
                        service,
                    )
                }
            })?;

        Ok(ObjectAttrs {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size_bytes: head.content_length().unwrap_or(0),
            content_type: head.content_type().map(str::to_string),
            media_link: self.media_link(bucket, path),
            updated_at: head.last_modified().and_then(smithy_time),
        })
    }

    async fn move_object(
        &self,
        src_bucket: &str,
        src_path: &str,
        dst_bucket: &str,
        dst_path: &str,
    ) -> AppResult<ObjectAttrs> {
        // Surfaces NotFound before any copy is attempted.
        self.get_attrs(src_bucket, src_path).await?;

        if self.exists(dst_bucket, dst_path).await? {
            return Err(AppError::already_exists(format!(
                "Object {dst_bucket}/{dst_path} already exists"
            )));
        }

        self.client
            .copy_object()
            .copy_source(format!("{src_bucket}/{src_path}"))
            .bucket(dst_bucket)
            .key(dst_path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to copy {src_bucket}/{src_path} to {dst_bucket}/{dst_path}"),
                    e.into_service_error(),
                )
            })?;

        // The destination copy is authoritative; a stale source is a
        // cleanup problem, not a move failure.
        if let Err(e) = self.delete(src_bucket, src_path).await {
            warn!(
                bucket = src_bucket,
                path = src_path,
                error = %e,
                "failed to delete source object after copy"
            );
        }

        self.get_attrs(dst_bucket, dst_path).await
    }

    async fn delete(&self, bucket: &str, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object {bucket}/{path}"),
                    e.into_service_error(),
                )
            })?;
        Ok(())
    }

    async fn compress_objects(
        &self,
        dst_bucket: &str,
        dst_path: &str,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<()> {
        let result = self
            .upload_archive(dst_bucket, dst_path, src_bucket, src_paths)
            .await;
        if let Err(e) = result {
            if let Err(cleanup) = self.delete(dst_bucket, dst_path).await {
                debug!(
                    bucket = dst_bucket,
                    path = dst_path,
                    error = %cleanup,
                    "no partial archive to clean up"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, path: &str, expiry: Duration) -> AppResult<String> {
        let seconds = expiry.num_seconds().clamp(1, MAX_PRESIGN);
        let presigning = PresigningConfig::expires_in(std::time::Duration::from_secs(
            seconds as u64,
        ))
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigning duration", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to sign URL for {bucket}/{path}"),
                    e.into_service_error(),
                )
            })?;
        Ok(request.uri().to_string())
    }
}
