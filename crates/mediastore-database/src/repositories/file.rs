//! File repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use mediastore_cache::keys;
use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::result::AppResult;
use mediastore_core::traits::cache::CacheProvider;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::file::{File, FileFilters, NewFile};
use mediastore_entity::time::deleted_sentinel;

use crate::store::FileStore;

use super::{cache_read, cache_write};

/// Cache-aside repository for file rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
    cache: Arc<dyn CacheProvider>,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool, cache: Arc<dyn CacheProvider>) -> Self {
        Self { pool, cache }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create(&self, new: &NewFile) -> AppResult<File> {
        let file = sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (id, customer_id, owner_id, account_id, reference_type, reference_id, \
              name, detail, bucket_name, filename, filepath, filesize, \
              uri_bucket, uri_download, download_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(new.id)
        .bind(new.customer_id)
        .bind(new.owner_id)
        .bind(new.account_id)
        .bind(new.reference_type)
        .bind(new.reference_id)
        .bind(&new.name)
        .bind(&new.detail)
        .bind(&new.bucket_name)
        .bind(&new.filename)
        .bind(&new.filepath)
        .bind(new.filesize)
        .bind(&new.uri_bucket)
        .bind(&new.uri_download)
        .bind(new.download_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        cache_write(&self.cache, &keys::file_by_id(file.id), &file).await;
        Ok(file)
    }

    async fn get(&self, id: Uuid) -> AppResult<File> {
        let key = keys::file_by_id(id);
        if let Some(file) = cache_read::<File>(&self.cache, &key).await {
            return Ok(file);
        }

        let file = sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        cache_write(&self.cache, &key, &file).await;
        Ok(file)
    }

    async fn list(&self, page: &PageRequest, filters: &FileFilters) -> AppResult<Vec<File>> {
        let cursor = page.cursor()?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM files WHERE created_at < ");
        query.push_bind(cursor);
        if !filters.deleted {
            query.push(" AND deleted_at = ");
            query.push_bind(deleted_sentinel());
        }
        if let Some(customer_id) = filters.customer_id {
            query.push(" AND customer_id = ");
            query.push_bind(customer_id);
        }
        if let Some(reference_type) = filters.reference_type {
            query.push(" AND reference_type = ");
            query.push_bind(reference_type);
        }
        if let Some(reference_id) = filters.reference_id {
            query.push(" AND reference_id = ");
            query.push_bind(reference_id);
        }
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(page.limit() as i64);

        query
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<File> {
        let file = sqlx::query_as::<_, File>(
            "UPDATE files SET updated_at = NOW(), deleted_at = NOW() \
             WHERE id = $1 AND deleted_at = $2 RETURNING *",
        )
        .bind(id)
        .bind(deleted_sentinel())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found or already deleted")))?;

        cache_write(&self.cache, &keys::file_by_id(id), &file).await;
        Ok(file)
    }
}
