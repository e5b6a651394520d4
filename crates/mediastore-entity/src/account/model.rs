//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::time::deleted_sentinel;

/// Per-tenant quota ledger.
///
/// At most one non-deleted account exists per customer. The counters
/// are eventually consistent with the sum over that customer's
/// non-deleted files.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// The tenant this account belongs to.
    pub customer_id: Uuid,
    /// Running count of non-deleted files.
    pub total_file_count: i64,
    /// Running total size of non-deleted files in bytes.
    pub total_file_size: i64,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; the sentinel means "not deleted".
    pub deleted_at: DateTime<Utc>,
}

impl Account {
    /// Whether the account has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at != deleted_sentinel()
    }
}

/// Data required to persist a new, zero-usage account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Pre-allocated account identifier.
    pub id: Uuid,
    /// The tenant this account belongs to.
    pub customer_id: Uuid,
}
