//! Customer lifecycle handling.
//!
//! Provisioning and teardown are driven by inbound customer events:
//! a created customer gets a storage account, a deleted customer loses
//! the account and all files.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use mediastore_core::error::ErrorKind;
use mediastore_core::events::CustomerEvent;
use mediastore_core::result::AppResult;
use mediastore_core::types::pagination::{next_token, PageRequest};
use mediastore_entity::file::FileFilters;

use crate::account::AccountEngine;
use crate::file::FileEngine;

/// Page size used when sweeping a deleted customer's files.
const SWEEP_PAGE_SIZE: u64 = 500;

/// Applies customer lifecycle events to the storage engines.
#[derive(Debug, Clone)]
pub struct CustomerLifecycleHandler {
    accounts: Arc<AccountEngine>,
    files: Arc<FileEngine>,
}

impl CustomerLifecycleHandler {
    /// Creates a new lifecycle handler.
    pub fn new(accounts: Arc<AccountEngine>, files: Arc<FileEngine>) -> Self {
        Self { accounts, files }
    }

    /// Dispatches one inbound event.
    pub async fn handle(&self, event: CustomerEvent) -> AppResult<()> {
        match event {
            CustomerEvent::CustomerCreated { customer_id } => {
                self.on_customer_created(customer_id).await
            }
            CustomerEvent::CustomerDeleted { customer_id } => {
                self.on_customer_deleted(customer_id).await
            }
        }
    }

    /// Provisions the storage account for a new customer. Redelivered
    /// events are tolerated: an existing account is not an error.
    async fn on_customer_created(&self, customer_id: Uuid) -> AppResult<()> {
        match self.accounts.create(customer_id).await {
            Ok(account) => {
                info!(customer_id = %customer_id, account_id = %account.id, "provisioned storage account");
                Ok(())
            }
            Err(e) if e.is_kind(ErrorKind::AlreadyExists) => {
                info!(customer_id = %customer_id, "storage account already provisioned");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Tears down a deleted customer: soft-deletes the account, then
    /// sweeps the customer's live files best-effort per file.
    async fn on_customer_deleted(&self, customer_id: Uuid) -> AppResult<()> {
        match self.accounts.get_by_customer(customer_id).await? {
            Some(account) => {
                self.accounts.delete(account.id).await?;
            }
            None => {
                info!(customer_id = %customer_id, "no storage account to tear down");
            }
        }

        self.sweep_files(customer_id).await
    }

    async fn sweep_files(&self, customer_id: Uuid) -> AppResult<()> {
        let filters = FileFilters::for_customer(customer_id);
        let mut page = PageRequest::new(None, SWEEP_PAGE_SIZE);

        loop {
            let files = self.files.list(&page, &filters).await?;
            let Some(last) = files.last() else { break };
            // Advance the cursor past this page even when deletes fail,
            // so a stuck file cannot pin the sweep in place.
            page.token = Some(next_token(last.created_at));

            for file in files {
                if let Err(e) = self.files.delete(file.id).await {
                    warn!(
                        customer_id = %customer_id,
                        file_id = %file.id,
                        error = %e,
                        "failed to delete file during customer teardown"
                    );
                }
            }
        }
        Ok(())
    }
}
