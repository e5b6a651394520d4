//! Typed list filters for files.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reference::ReferenceType;

/// Filters applied to file list queries.
///
/// `deleted` defaults to `false` so default queries exclude
/// soft-deleted rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileFilters {
    /// Restrict to one tenant.
    pub customer_id: Option<Uuid>,
    /// Restrict to one reference type.
    pub reference_type: Option<ReferenceType>,
    /// Restrict to one referenced resource.
    pub reference_id: Option<Uuid>,
    /// Include soft-deleted rows.
    pub deleted: bool,
}

impl FileFilters {
    /// Filter for a single tenant's live files.
    pub fn for_customer(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    /// Filter for the live files attached to one reference.
    pub fn for_reference(reference_type: ReferenceType, reference_id: Uuid) -> Self {
        Self {
            reference_type: Some(reference_type),
            reference_id: Some(reference_id),
            ..Self::default()
        }
    }
}
