//! Compressed download bundles.
//!
//! Bundles are content-addressed: the archive path is derived from the
//! sorted set of source paths, so repeated requests for the same set
//! resolve to the same object and the zip is built at most once.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use mediastore_core::error::AppError;
use mediastore_core::result::AppResult;

use super::service::FileEngine;

/// Directory prefix for compressed bundles in the temporary bucket.
const COMPRESS_PREFIX: &str = "compress";

/// A signed download location for a bucket object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DownloadUri {
    /// Direct (unsigned) media link.
    pub media_link: String,
    /// Time-boxed signed download URL.
    pub signed_url: String,
    /// When the signed URL expires.
    pub expires_at: DateTime<Utc>,
}

impl FileEngine {
    /// Compresses the source objects into a single archive in the
    /// temporary bucket, returning `(bucket, path)`.
    ///
    /// An archive already present at the derived path is returned as-is
    /// without recompressing.
    pub async fn compress_create(
        &self,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<(String, String)> {
        if src_paths.is_empty() {
            return Err(AppError::validation("no source paths to compress"));
        }

        let dst_path = archive_path(src_paths);
        let tmp_bucket = self.tmp_bucket().to_string();

        if self.bucket().exists(&tmp_bucket, &dst_path).await? {
            return Ok((tmp_bucket, dst_path));
        }

        self.bucket()
            .compress_objects(&tmp_bucket, &dst_path, src_bucket, src_paths)
            .await?;

        // A reported success with no object behind it means the backend
        // lied; surface that rather than handing out a dead path.
        if !self.bucket().exists(&tmp_bucket, &dst_path).await? {
            return Err(AppError::internal("compression produced no output"));
        }

        Ok((tmp_bucket, dst_path))
    }

    /// Issues a signed download URL valid for `ttl` alongside the
    /// object's direct media link.
    pub async fn download_uri(
        &self,
        bucket: &str,
        path: &str,
        ttl: Duration,
    ) -> AppResult<DownloadUri> {
        let attrs = self.bucket().get_attrs(bucket, path).await?;
        let signed_url = self.bucket().signed_url(bucket, path, ttl).await?;
        Ok(DownloadUri {
            media_link: attrs.media_link,
            signed_url,
            expires_at: Utc::now() + ttl,
        })
    }
}

/// Content-addressed archive path: a digest of the sorted, deduplicated
/// source paths. Path order and repeats do not change the address.
fn archive_path(src_paths: &[String]) -> String {
    let mut paths: Vec<&str> = src_paths.iter().map(String::as_str).collect();
    paths.sort_unstable();
    paths.dedup();

    let mut hasher = Sha256::new();
    for path in &paths {
        hasher.update(path.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("{COMPRESS_PREFIX}/{hex}.zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_path_order_independent() {
        let a = archive_path(&["x.wav".into(), "y.wav".into()]);
        let b = archive_path(&["y.wav".into(), "x.wav".into()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_archive_path_dedups() {
        let a = archive_path(&["x.wav".into(), "x.wav".into()]);
        let b = archive_path(&["x.wav".into()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_archive_path_distinguishes_sets() {
        let a = archive_path(&["x.wav".into()]);
        let b = archive_path(&["y.wav".into()]);
        assert_ne!(a, b);
        assert!(a.starts_with("compress/"));
        assert!(a.ends_with(".zip"));
    }
}
