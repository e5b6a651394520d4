//! Account repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use mediastore_cache::keys;
use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::result::AppResult;
use mediastore_core::traits::cache::CacheProvider;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::account::{Account, AccountFilters, NewAccount};
use mediastore_entity::time::deleted_sentinel;

use crate::store::AccountStore;

use super::{cache_read, cache_write};

/// Cache-aside repository for account rows.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
    cache: Arc<dyn CacheProvider>,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool, cache: Arc<dyn CacheProvider>) -> Self {
        Self { pool, cache }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn create(&self, new: &NewAccount) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, customer_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.id)
        .bind(new.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create account", e))?;

        cache_write(&self.cache, &keys::account_by_id(account.id), &account).await;
        Ok(account)
    }

    async fn get(&self, id: Uuid) -> AppResult<Account> {
        let key = keys::account_by_id(id);
        if let Some(account) = cache_read::<Account>(&self.cache, &key).await {
            return Ok(account);
        }

        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        cache_write(&self.cache, &key, &account).await;
        Ok(account)
    }

    async fn get_by_customer(&self, customer_id: Uuid) -> AppResult<Option<Account>> {
        // Deliberately uncached: this read backs the duplicate-account
        // guard and the quota check.
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE customer_id = $1 AND deleted_at = $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(customer_id)
        .bind(deleted_sentinel())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find customer account", e)
        })
    }

    async fn list(&self, page: &PageRequest, filters: &AccountFilters) -> AppResult<Vec<Account>> {
        let cursor = page.cursor()?;

        let mut query =
            QueryBuilder::<Postgres>::new("SELECT * FROM accounts WHERE created_at < ");
        query.push_bind(cursor);
        if !filters.deleted {
            query.push(" AND deleted_at = ");
            query.push_bind(deleted_sentinel());
        }
        if let Some(customer_id) = filters.customer_id {
            query.push(" AND customer_id = ");
            query.push_bind(customer_id);
        }
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(page.limit() as i64);

        query
            .build_query_as::<Account>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET updated_at = NOW(), deleted_at = NOW() \
             WHERE id = $1 AND deleted_at = $2 RETURNING *",
        )
        .bind(id)
        .bind(deleted_sentinel())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?
        .ok_or_else(|| {
            AppError::not_found(format!("Account {id} not found or already deleted"))
        })?;

        cache_write(&self.cache, &keys::account_by_id(id), &account).await;
        Ok(account)
    }

    async fn update_usage(
        &self,
        id: Uuid,
        delta_count: i64,
        delta_size: i64,
    ) -> AppResult<Account> {
        // Single atomic delta update; concurrent calls never lose
        // increments to each other.
        let account = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET \
             total_file_count = total_file_count + $2, \
             total_file_size = total_file_size + $3, \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at = $4 RETURNING *",
        )
        .bind(id)
        .bind(delta_count)
        .bind(delta_size)
        .bind(deleted_sentinel())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update account usage", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        cache_write(&self.cache, &keys::account_by_id(id), &account).await;
        Ok(account)
    }
}
