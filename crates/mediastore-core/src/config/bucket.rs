//! Object-store configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Bucket holding managed media files.
    pub media_bucket: String,
    /// Bucket holding temporary objects (compressed download bundles).
    pub tmp_bucket: String,
    /// Endpoint URL (for non-AWS services like MinIO). Empty uses the
    /// ambient AWS endpoint resolution.
    #[serde(default)]
    pub endpoint: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID. Empty falls back to ambient identity
    /// (instance profile, environment).
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Per-account storage quota in bytes (default 1 GiB).
    #[serde(default = "default_quota_bytes")]
    pub account_quota_bytes: i64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_quota_bytes() -> i64 {
    1_073_741_824 // 1 GiB
}
