//! Recording bundles: all files attached to one recording, compressed
//! into a single downloadable archive.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use mediastore_core::error::AppError;
use mediastore_core::result::AppResult;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::file::{FileFilters, FilePayload, ReferenceType};

use super::service::FileEngine;

/// How long recording download links stay valid.
const RECORDING_LINK_TTL_HOURS: i64 = 24;

/// Recordings are bounded sets; one max-size page covers them.
const RECORDING_PAGE_SIZE: u64 = 1000;

/// A downloadable archive of a recording's files.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecordingBundle {
    /// The files included in the archive.
    pub files: Vec<FilePayload>,
    /// Bucket holding the archive.
    pub bucket: String,
    /// Archive path within the bucket.
    pub path: String,
    /// Signed download URL for the archive.
    pub uri_download: String,
    /// When the download URL expires.
    pub download_expires_at: DateTime<Utc>,
}

impl FileEngine {
    /// Bundles every live file attached to a recording into one
    /// archive and returns a 24-hour download link for it.
    pub async fn recording_get(
        &self,
        customer_id: Uuid,
        reference_id: Uuid,
    ) -> AppResult<RecordingBundle> {
        let files = self.recording_files(customer_id, reference_id).await?;
        if files.is_empty() {
            return Err(AppError::not_found(format!(
                "Recording {reference_id} has no files"
            )));
        }

        let src_bucket = files[0].bucket_name.clone();
        let src_paths: Vec<String> = files.iter().map(|f| f.filepath.clone()).collect();

        let (bucket, path) = self.compress_create(&src_bucket, &src_paths).await?;
        let ttl = Duration::hours(RECORDING_LINK_TTL_HOURS);
        let uri = self.download_uri(&bucket, &path, ttl).await?;

        Ok(RecordingBundle {
            files: files.iter().map(|f| f.to_payload()).collect(),
            bucket,
            path,
            uri_download: uri.signed_url,
            download_expires_at: uri.expires_at,
        })
    }

    /// Deletes every live file attached to a recording, best-effort per
    /// file, returning the number actually deleted.
    pub async fn recording_delete(
        &self,
        customer_id: Uuid,
        reference_id: Uuid,
    ) -> AppResult<usize> {
        let files = self.recording_files(customer_id, reference_id).await?;
        if files.is_empty() {
            return Err(AppError::not_found(format!(
                "Recording {reference_id} has no files"
            )));
        }

        let mut deleted = 0;
        for file in files {
            match self.delete(file.id).await {
                Ok(_) => deleted += 1,
                Err(e) => {
                    warn!(
                        file_id = %file.id,
                        reference_id = %reference_id,
                        error = %e,
                        "failed to delete recording file"
                    );
                }
            }
        }
        Ok(deleted)
    }

    async fn recording_files(
        &self,
        customer_id: Uuid,
        reference_id: Uuid,
    ) -> AppResult<Vec<mediastore_entity::file::File>> {
        let mut filters = FileFilters::for_reference(ReferenceType::Recording, reference_id);
        filters.customer_id = Some(customer_id);
        self.files()
            .list(&PageRequest::new(None, RECORDING_PAGE_SIZE), &filters)
            .await
    }
}
