//! Core file operations.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use mediastore_core::error::AppError;
use mediastore_core::events::EventType;
use mediastore_core::result::AppResult;
use mediastore_core::traits::bucket::BucketStore;
use mediastore_core::traits::notifier::EventNotifier;
use mediastore_core::types::pagination::PageRequest;
use mediastore_database::store::FileStore;
use mediastore_entity::file::{File, FileFilters, NewFile, ReferenceType};

use crate::account::AccountEngine;

/// Directory prefix for managed file objects in the media bucket.
const MANAGED_PREFIX: &str = "files";

/// Validity of the long-lived download URL persisted on the row.
const DOWNLOAD_URL_TTL_DAYS: i64 = 3650;

/// Request to take ownership of an uploaded object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFileRequest {
    /// The tenant owning the file.
    pub customer_id: Uuid,
    /// The agent or resource that produced the file.
    pub owner_id: Uuid,
    /// What the file is attached to.
    pub reference_type: ReferenceType,
    /// Identifier of the referenced resource.
    pub reference_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub detail: String,
    /// Original filename, used in the destination path.
    pub filename: String,
    /// Bucket the object was uploaded to.
    pub src_bucket: String,
    /// Path of the uploaded object.
    pub src_path: String,
}

impl CreateFileRequest {
    fn validate(&self) -> AppResult<()> {
        if self.customer_id.is_nil() {
            return Err(AppError::validation("customer_id is required"));
        }
        if self.owner_id.is_nil() {
            return Err(AppError::validation("owner_id is required"));
        }
        if self.filename.is_empty() {
            return Err(AppError::validation("filename is required"));
        }
        if self.src_bucket.is_empty() || self.src_path.is_empty() {
            return Err(AppError::validation("source bucket and path are required"));
        }
        Ok(())
    }
}

/// Manages file rows and their backing bucket objects.
#[derive(Debug, Clone)]
pub struct FileEngine {
    /// File repository.
    files: Arc<dyn FileStore>,
    /// Account engine, for quota checks and usage counters.
    accounts: Arc<AccountEngine>,
    /// Object store.
    bucket: Arc<dyn BucketStore>,
    /// Outbound event channel.
    notifier: Arc<dyn EventNotifier>,
    /// Bucket holding managed media files.
    media_bucket: String,
    /// Bucket holding temporary objects (compressed bundles).
    tmp_bucket: String,
}

impl FileEngine {
    /// Creates a new file engine.
    pub fn new(
        files: Arc<dyn FileStore>,
        accounts: Arc<AccountEngine>,
        bucket: Arc<dyn BucketStore>,
        notifier: Arc<dyn EventNotifier>,
        media_bucket: impl Into<String>,
        tmp_bucket: impl Into<String>,
    ) -> Self {
        Self {
            files,
            accounts,
            bucket,
            notifier,
            media_bucket: media_bucket.into(),
            tmp_bucket: tmp_bucket.into(),
        }
    }

    pub(crate) fn bucket(&self) -> &Arc<dyn BucketStore> {
        &self.bucket
    }

    pub(crate) fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    pub(crate) fn tmp_bucket(&self) -> &str {
        &self.tmp_bucket
    }

    /// Takes ownership of an uploaded object: validates quota, moves
    /// the object into the media bucket, persists the row, and adjusts
    /// the account counters.
    ///
    /// The counter increment is best-effort; its failure never rolls
    /// back the created file.
    pub async fn create(&self, req: CreateFileRequest) -> AppResult<File> {
        req.validate()?;

        let attrs = self
            .bucket
            .get_attrs(&req.src_bucket, &req.src_path)
            .await
            .map_err(|e| {
                if e.is_kind(mediastore_core::error::ErrorKind::NotFound) {
                    AppError::not_found("source file does not exist")
                } else {
                    e
                }
            })?;

        let account = self
            .accounts
            .validate_file_info(req.customer_id, attrs.size_bytes)
            .await?;

        let id = Uuid::new_v4();
        let dst_path = format!("{MANAGED_PREFIX}/{id}/{filename}", filename = req.filename);

        let moved = self
            .bucket
            .move_object(&req.src_bucket, &req.src_path, &self.media_bucket, &dst_path)
            .await?;

        let ttl = Duration::days(DOWNLOAD_URL_TTL_DAYS);
        let uri_download = self
            .bucket
            .signed_url(&self.media_bucket, &dst_path, ttl)
            .await?;

        let file = self
            .files
            .create(&NewFile {
                id,
                customer_id: req.customer_id,
                owner_id: req.owner_id,
                account_id: account.id,
                reference_type: req.reference_type,
                reference_id: req.reference_id,
                name: req.name,
                detail: req.detail,
                bucket_name: self.media_bucket.clone(),
                filename: req.filename,
                filepath: dst_path,
                filesize: attrs.size_bytes,
                uri_bucket: moved.media_link,
                uri_download,
                download_expires_at: Utc::now() + ttl,
            })
            .await?;

        info!(file_id = %file.id, customer_id = %file.customer_id, size = file.filesize, "file created");
        self.publish(&file, EventType::FileCreated).await;

        if let Err(e) = self
            .accounts
            .increase_file_info(account.id, 1, file.filesize)
            .await
        {
            warn!(
                file_id = %file.id,
                account_id = %account.id,
                error = %e,
                "failed to increase account usage"
            );
        }

        Ok(file)
    }

    /// Fetches a file by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<File> {
        self.files.get(id).await
    }

    /// Lists files, newest first.
    pub async fn list(&self, page: &PageRequest, filters: &FileFilters) -> AppResult<Vec<File>> {
        self.files.list(page, filters).await
    }

    /// Soft-deletes a file and best-effort removes its bucket object
    /// and usage counters.
    ///
    /// Deleting an unknown or already-deleted ID fails with `NotFound`.
    pub async fn delete(&self, id: Uuid) -> AppResult<File> {
        let file = self.files.delete(id).await?;

        if let Err(e) = self.bucket.delete(&file.bucket_name, &file.filepath).await {
            warn!(
                file_id = %id,
                bucket = %file.bucket_name,
                path = %file.filepath,
                error = %e,
                "failed to delete bucket object"
            );
        }

        info!(file_id = %id, customer_id = %file.customer_id, "file deleted");
        self.publish(&file, EventType::FileDeleted).await;

        if let Err(e) = self
            .accounts
            .decrease_file_info(file.account_id, 1, file.filesize)
            .await
        {
            warn!(
                file_id = %id,
                account_id = %file.account_id,
                error = %e,
                "failed to decrease account usage"
            );
        }

        Ok(file)
    }

    /// Publishes a file event; failures are logged, never returned.
    pub(crate) async fn publish(&self, file: &File, event_type: EventType) {
        let payload = match serde_json::to_value(file.to_payload()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(file_id = %file.id, error = %e, "failed to serialize file event");
                return;
            }
        };
        if let Err(e) = self
            .notifier
            .publish(file.customer_id, event_type, payload)
            .await
        {
            warn!(
                file_id = %file.id,
                event = %event_type,
                error = %e,
                "failed to publish file event"
            );
        }
    }
}
