//! Account CRUD and usage accounting.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use mediastore_core::error::AppError;
use mediastore_core::events::EventType;
use mediastore_core::result::AppResult;
use mediastore_core::traits::notifier::EventNotifier;
use mediastore_core::types::pagination::PageRequest;
use mediastore_database::store::AccountStore;
use mediastore_entity::account::{Account, AccountFilters, NewAccount};

/// Manages storage accounts: one live account per customer, with
/// usage counters billed against a fixed per-account quota.
#[derive(Debug, Clone)]
pub struct AccountEngine {
    /// Account repository.
    store: Arc<dyn AccountStore>,
    /// Outbound event channel.
    notifier: Arc<dyn EventNotifier>,
    /// Per-account storage quota in bytes.
    quota_bytes: i64,
}

impl AccountEngine {
    /// Creates a new account engine.
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn EventNotifier>,
        quota_bytes: i64,
    ) -> Self {
        Self {
            store,
            notifier,
            quota_bytes,
        }
    }

    /// The configured per-account quota in bytes.
    pub fn quota_bytes(&self) -> i64 {
        self.quota_bytes
    }

    /// Creates a zero-usage account for a customer.
    ///
    /// Fails with `AlreadyExists` when the customer already has a live
    /// account; the guard is a filtered read, not a unique constraint.
    pub async fn create(&self, customer_id: Uuid) -> AppResult<Account> {
        if customer_id.is_nil() {
            return Err(AppError::validation("customer_id is required"));
        }

        if self.store.get_by_customer(customer_id).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Customer {customer_id} already has a storage account"
            )));
        }

        let account = self
            .store
            .create(&NewAccount {
                id: Uuid::new_v4(),
                customer_id,
            })
            .await?;

        info!(account_id = %account.id, customer_id = %customer_id, "account created");
        self.publish(&account, EventType::AccountCreated).await;
        Ok(account)
    }

    /// Fetches an account by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<Account> {
        self.store.get(id).await
    }

    /// The live account for a customer, if any.
    pub async fn get_by_customer(&self, customer_id: Uuid) -> AppResult<Option<Account>> {
        self.store.get_by_customer(customer_id).await
    }

    /// Lists accounts, newest first.
    pub async fn list(
        &self,
        page: &PageRequest,
        filters: &AccountFilters,
    ) -> AppResult<Vec<Account>> {
        self.store.list(page, filters).await
    }

    /// Soft-deletes an account.
    pub async fn delete(&self, id: Uuid) -> AppResult<Account> {
        let account = self.store.delete(id).await?;
        info!(account_id = %id, "account deleted");
        self.publish(&account, EventType::AccountDeleted).await;
        Ok(account)
    }

    /// Adds a file to the usage counters.
    pub async fn increase_file_info(
        &self,
        id: Uuid,
        delta_count: i64,
        delta_size: i64,
    ) -> AppResult<Account> {
        let account = self.store.update_usage(id, delta_count, delta_size).await?;
        self.publish(&account, EventType::AccountUpdated).await;
        Ok(account)
    }

    /// Removes a file from the usage counters.
    pub async fn decrease_file_info(
        &self,
        id: Uuid,
        delta_count: i64,
        delta_size: i64,
    ) -> AppResult<Account> {
        let account = self
            .store
            .update_usage(id, -delta_count, -delta_size)
            .await?;
        self.publish(&account, EventType::AccountUpdated).await;
        Ok(account)
    }

    /// Checks whether a customer's account can absorb `add_size` more
    /// bytes, returning the account on success.
    ///
    /// This only reads; it does not reserve capacity. Concurrent
    /// creates can jointly overshoot the quota by at most one in-flight
    /// file each.
    pub async fn validate_file_info(&self, customer_id: Uuid, add_size: i64) -> AppResult<Account> {
        let account = self
            .store
            .get_by_customer(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Customer {customer_id} has no storage account"))
            })?;

        if account.total_file_size + add_size > self.quota_bytes {
            return Err(AppError::quota_exceeded(format!(
                "Account {} holds {} bytes; adding {} would exceed the {}-byte quota",
                account.id, account.total_file_size, add_size, self.quota_bytes
            )));
        }
        Ok(account)
    }

    /// Publishes an account event; failures are logged, never returned.
    async fn publish(&self, account: &Account, event_type: EventType) {
        let payload = match serde_json::to_value(account) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "failed to serialize account event");
                return;
            }
        };
        if let Err(e) = self
            .notifier
            .publish(account.customer_id, event_type, payload)
            .await
        {
            warn!(
                account_id = %account.id,
                event = %event_type,
                error = %e,
                "failed to publish account event"
            );
        }
    }
}
