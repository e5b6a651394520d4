//! Shared in-memory fakes for the engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use mediastore_bucket::MemoryBucketStore;
use mediastore_core::error::AppError;
use mediastore_core::events::EventType;
use mediastore_core::result::AppResult;
use mediastore_core::traits::bucket::{BucketStore, ObjectAttrs};
use mediastore_core::traits::notifier::EventNotifier;
use mediastore_core::types::pagination::PageRequest;
use mediastore_database::store::{AccountStore, FileStore};
use mediastore_entity::account::{Account, AccountFilters, NewAccount};
use mediastore_entity::file::{File, FileFilters, NewFile};
use mediastore_entity::time::deleted_sentinel;
use mediastore_service::{AccountEngine, FileEngine};

/// In-memory `FileStore` with the repository's filter and cursor
/// semantics.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    rows: Mutex<HashMap<Uuid, File>>,
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn create(&self, new: &NewFile) -> AppResult<File> {
        let now = Utc::now();
        let file = File {
            id: new.id,
            customer_id: new.customer_id,
            owner_id: new.owner_id,
            account_id: new.account_id,
            reference_type: new.reference_type,
            reference_id: new.reference_id,
            name: new.name.clone(),
            detail: new.detail.clone(),
            bucket_name: new.bucket_name.clone(),
            filename: new.filename.clone(),
            filepath: new.filepath.clone(),
            filesize: new.filesize,
            uri_bucket: new.uri_bucket.clone(),
            uri_download: new.uri_download.clone(),
            download_expires_at: new.download_expires_at,
            created_at: now,
            updated_at: now,
            deleted_at: deleted_sentinel(),
        };
        self.rows.lock().unwrap().insert(file.id, file.clone());
        Ok(file)
    }

    async fn get(&self, id: Uuid) -> AppResult<File> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn list(&self, page: &PageRequest, filters: &FileFilters) -> AppResult<Vec<File>> {
        let cursor = page.cursor()?;
        let mut files: Vec<File> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|f| f.created_at < cursor)
            .filter(|f| filters.deleted || !f.is_deleted())
            .filter(|f| filters.customer_id.is_none_or(|c| f.customer_id == c))
            .filter(|f| filters.reference_type.is_none_or(|t| f.reference_type == t))
            .filter(|f| filters.reference_id.is_none_or(|r| f.reference_id == r))
            .cloned()
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        files.truncate(page.limit() as usize);
        Ok(files)
    }

    async fn delete(&self, id: Uuid) -> AppResult<File> {
        let mut rows = self.rows.lock().unwrap();
        let file = rows
            .get_mut(&id)
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found or already deleted")))?;
        let now = Utc::now();
        file.updated_at = now;
        file.deleted_at = now;
        Ok(file.clone())
    }
}

/// In-memory `AccountStore`.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    rows: Mutex<HashMap<Uuid, Account>>,
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, new: &NewAccount) -> AppResult<Account> {
        let now = Utc::now();
        let account = Account {
            id: new.id,
            customer_id: new.customer_id,
            total_file_count: 0,
            total_file_size: 0,
            created_at: now,
            updated_at: now,
            deleted_at: deleted_sentinel(),
        };
        self.rows.lock().unwrap().insert(account.id, account.clone());
        Ok(account)
    }

    async fn get(&self, id: Uuid) -> AppResult<Account> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn get_by_customer(&self, customer_id: Uuid) -> AppResult<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.customer_id == customer_id && !a.is_deleted())
            .max_by_key(|a| a.created_at)
            .cloned())
    }

    async fn list(&self, page: &PageRequest, filters: &AccountFilters) -> AppResult<Vec<Account>> {
        let cursor = page.cursor()?;
        let mut accounts: Vec<Account> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.created_at < cursor)
            .filter(|a| filters.deleted || !a.is_deleted())
            .filter(|a| filters.customer_id.is_none_or(|c| a.customer_id == c))
            .cloned()
            .collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        accounts.truncate(page.limit() as usize);
        Ok(accounts)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Account> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .get_mut(&id)
            .filter(|a| !a.is_deleted())
            .ok_or_else(|| {
                AppError::not_found(format!("Account {id} not found or already deleted"))
            })?;
        let now = Utc::now();
        account.updated_at = now;
        account.deleted_at = now;
        Ok(account.clone())
    }

    async fn update_usage(
        &self,
        id: Uuid,
        delta_count: i64,
        delta_size: i64,
    ) -> AppResult<Account> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .get_mut(&id)
            .filter(|a| !a.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.total_file_count += delta_count;
        account.total_file_size += delta_size;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

/// Notifier that records every published event.
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    events: Mutex<Vec<(Uuid, EventType, serde_json::Value)>>,
}

impl CapturingNotifier {
    pub fn events(&self) -> Vec<(Uuid, EventType, serde_json::Value)> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_of(&self, event_type: EventType) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, t, _)| *t == event_type)
            .count()
    }
}

#[async_trait]
impl EventNotifier for CapturingNotifier {
    async fn publish(
        &self,
        customer_id: Uuid,
        event_type: EventType,
        payload: serde_json::Value,
    ) -> AppResult<()> {
        self.events
            .lock()
            .unwrap()
            .push((customer_id, event_type, payload));
        Ok(())
    }
}

/// Bucket store that counts compression calls and can be told to
/// reject moves with a destination collision.
#[derive(Debug, Default)]
pub struct SpyBucketStore {
    pub inner: MemoryBucketStore,
    pub compress_calls: AtomicUsize,
    pub collide_on_move: AtomicBool,
}

impl SpyBucketStore {
    pub fn compress_calls(&self) -> usize {
        self.compress_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BucketStore for SpyBucketStore {
    async fn get_attrs(&self, bucket: &str, path: &str) -> AppResult<ObjectAttrs> {
        self.inner.get_attrs(bucket, path).await
    }

    async fn move_object(
        &self,
        src_bucket: &str,
        src_path: &str,
        dst_bucket: &str,
        dst_path: &str,
    ) -> AppResult<ObjectAttrs> {
        if self.collide_on_move.load(Ordering::SeqCst) {
            return Err(AppError::already_exists(format!(
                "Object {dst_bucket}/{dst_path} already exists"
            )));
        }
        self.inner
            .move_object(src_bucket, src_path, dst_bucket, dst_path)
            .await
    }

    async fn delete(&self, bucket: &str, path: &str) -> AppResult<()> {
        self.inner.delete(bucket, path).await
    }

    async fn compress_objects(
        &self,
        dst_bucket: &str,
        dst_path: &str,
        src_bucket: &str,
        src_paths: &[String],
    ) -> AppResult<()> {
        self.compress_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .compress_objects(dst_bucket, dst_path, src_bucket, src_paths)
            .await
    }

    async fn signed_url(&self, bucket: &str, path: &str, expiry: Duration) -> AppResult<String> {
        self.inner.signed_url(bucket, path, expiry).await
    }
}

pub const MEDIA_BUCKET: &str = "media";
pub const TMP_BUCKET: &str = "tmp";
pub const UPLOAD_BUCKET: &str = "uploads";

/// Fully wired engines over in-memory fakes.
pub struct TestEngines {
    pub accounts: Arc<AccountEngine>,
    pub files: Arc<FileEngine>,
    pub file_store: Arc<InMemoryFileStore>,
    pub account_store: Arc<InMemoryAccountStore>,
    pub bucket: Arc<SpyBucketStore>,
    pub notifier: Arc<CapturingNotifier>,
}

pub fn engines(quota_bytes: i64) -> TestEngines {
    let file_store = Arc::new(InMemoryFileStore::default());
    let account_store = Arc::new(InMemoryAccountStore::default());
    let bucket = Arc::new(SpyBucketStore::default());
    let notifier = Arc::new(CapturingNotifier::default());

    let accounts = Arc::new(AccountEngine::new(
        account_store.clone() as Arc<dyn AccountStore>,
        notifier.clone() as Arc<dyn EventNotifier>,
        quota_bytes,
    ));
    let files = Arc::new(FileEngine::new(
        file_store.clone() as Arc<dyn FileStore>,
        accounts.clone(),
        bucket.clone() as Arc<dyn BucketStore>,
        notifier.clone() as Arc<dyn EventNotifier>,
        MEDIA_BUCKET,
        TMP_BUCKET,
    ));

    TestEngines {
        accounts,
        files,
        file_store,
        account_store,
        bucket,
        notifier,
    }
}

/// Stage an uploaded object of `size` bytes in the upload bucket.
pub async fn seed_upload(bucket: &SpyBucketStore, path: &str, size: usize) {
    bucket
        .inner
        .put(UPLOAD_BUCKET, path, vec![0u8; size], Some("audio/wav"))
        .await;
}

/// A create request for a staged upload.
pub fn create_request(
    customer_id: Uuid,
    src_path: &str,
    filename: &str,
) -> mediastore_service::CreateFileRequest {
    mediastore_service::CreateFileRequest {
        customer_id,
        owner_id: Uuid::new_v4(),
        reference_type: mediastore_entity::file::ReferenceType::Normal,
        reference_id: Uuid::new_v4(),
        name: filename.to_string(),
        detail: String::new(),
        filename: filename.to_string(),
        src_bucket: UPLOAD_BUCKET.to_string(),
        src_path: src_path.to_string(),
    }
}
