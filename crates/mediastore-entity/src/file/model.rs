//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::time::deleted_sentinel;

use super::reference::ReferenceType;

/// A binary artifact owned by the storage engine.
///
/// A file is immutable except for its timestamps and soft-delete
/// marker; its content is never replaced in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The tenant owning the file.
    pub customer_id: Uuid,
    /// The agent or resource that produced the file.
    pub owner_id: Uuid,
    /// The storage account the file is billed against.
    pub account_id: Uuid,
    /// What the file is attached to.
    pub reference_type: ReferenceType,
    /// Identifier of the referenced resource.
    pub reference_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub detail: String,
    /// Bucket holding the object.
    pub bucket_name: String,
    /// Original filename.
    pub filename: String,
    /// Object path within the bucket.
    pub filepath: String,
    /// Object size in bytes.
    pub filesize: i64,
    /// Direct (unsigned) media link for the object.
    pub uri_bucket: String,
    /// Long-lived signed download URL.
    pub uri_download: String,
    /// When the signed download URL expires.
    pub download_expires_at: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; the sentinel means "not deleted".
    pub deleted_at: DateTime<Utc>,
}

impl File {
    /// Whether the file has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at != deleted_sentinel()
    }

    /// The event/webhook view of this file: media metadata and the
    /// download URL, without raw bucket coordinates.
    pub fn to_payload(&self) -> FilePayload {
        FilePayload {
            id: self.id,
            customer_id: self.customer_id,
            owner_id: self.owner_id,
            account_id: self.account_id,
            reference_type: self.reference_type,
            reference_id: self.reference_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            filename: self.filename.clone(),
            filesize: self.filesize,
            uri_download: self.uri_download.clone(),
            download_expires_at: self.download_expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// The outward-facing file view published in domain events.
///
/// Deliberately omits `bucket_name`, `filepath`, and `uri_bucket` so
/// raw bucket coordinates never leave the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    /// Unique file identifier.
    pub id: Uuid,
    /// The tenant owning the file.
    pub customer_id: Uuid,
    /// The agent or resource that produced the file.
    pub owner_id: Uuid,
    /// The storage account the file is billed against.
    pub account_id: Uuid,
    /// What the file is attached to.
    pub reference_type: ReferenceType,
    /// Identifier of the referenced resource.
    pub reference_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub detail: String,
    /// Original filename.
    pub filename: String,
    /// Object size in bytes.
    pub filesize: i64,
    /// Long-lived signed download URL.
    pub uri_download: String,
    /// When the signed download URL expires.
    pub download_expires_at: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: DateTime<Utc>,
}

/// Data required to persist a new file row.
///
/// Timestamps are server-computed on insert; the repository re-reads
/// the canonical row afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFile {
    /// Pre-allocated file identifier.
    pub id: Uuid,
    /// The tenant owning the file.
    pub customer_id: Uuid,
    /// The agent or resource that produced the file.
    pub owner_id: Uuid,
    /// The storage account the file is billed against.
    pub account_id: Uuid,
    /// What the file is attached to.
    pub reference_type: ReferenceType,
    /// Identifier of the referenced resource.
    pub reference_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub detail: String,
    /// Bucket holding the object.
    pub bucket_name: String,
    /// Original filename.
    pub filename: String,
    /// Object path within the bucket.
    pub filepath: String,
    /// Object size in bytes.
    pub filesize: i64,
    /// Direct media link for the object.
    pub uri_bucket: String,
    /// Long-lived signed download URL.
    pub uri_download: String,
    /// When the signed download URL expires.
    pub download_expires_at: DateTime<Utc>,
}
