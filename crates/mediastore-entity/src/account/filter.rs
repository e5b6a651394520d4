//! Typed list filters for accounts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filters applied to account list queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFilters {
    /// Restrict to one tenant.
    pub customer_id: Option<Uuid>,
    /// Include soft-deleted rows.
    pub deleted: bool,
}

impl AccountFilters {
    /// Filter for a single tenant's live accounts.
    pub fn for_customer(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            deleted: false,
        }
    }
}
