//! Store trait seams between the engines and persistence.
//!
//! The engines depend on these traits, not on the concrete
//! repositories, so they can be exercised against in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use mediastore_core::result::AppResult;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::account::{Account, AccountFilters, NewAccount};
use mediastore_entity::file::{File, FileFilters, NewFile};

/// Durable storage for file rows, fronted by the cache.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new row and return the canonical stored row.
    async fn create(&self, new: &NewFile) -> AppResult<File>;

    /// Fetch a row by ID (soft-deleted rows included). `NotFound` when
    /// the row never existed.
    async fn get(&self, id: Uuid) -> AppResult<File>;

    /// List rows matching the filters, newest first, strictly older
    /// than the page cursor.
    async fn list(&self, page: &PageRequest, filters: &FileFilters) -> AppResult<Vec<File>>;

    /// Soft-delete a row and return it as re-read from durable
    /// storage. `NotFound` when the row never existed or was already
    /// deleted; delete is not silently idempotent.
    async fn delete(&self, id: Uuid) -> AppResult<File>;
}

/// Durable storage for account rows, fronted by the cache.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new zero-usage row and return the canonical stored row.
    async fn create(&self, new: &NewAccount) -> AppResult<Account>;

    /// Fetch a row by ID (soft-deleted rows included).
    async fn get(&self, id: Uuid) -> AppResult<Account>;

    /// The newest non-deleted account for a customer, if any. Always
    /// reads durable storage: this backs the one-account-per-customer
    /// guard and the quota check.
    async fn get_by_customer(&self, customer_id: Uuid) -> AppResult<Option<Account>>;

    /// List rows matching the filters, newest first, strictly older
    /// than the page cursor.
    async fn list(&self, page: &PageRequest, filters: &AccountFilters) -> AppResult<Vec<Account>>;

    /// Soft-delete a row and return it as re-read from durable
    /// storage. `NotFound` on zero affected rows.
    async fn delete(&self, id: Uuid) -> AppResult<Account>;

    /// Atomically add the deltas to the usage counters
    /// (`count = count + delta`, no read-modify-write) and return the
    /// re-read row. `NotFound` when no live row was updated.
    async fn update_usage(
        &self,
        id: Uuid,
        delta_count: i64,
        delta_size: i64,
    ) -> AppResult<Account>;
}
