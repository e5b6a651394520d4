//! Inbound customer lifecycle events.
//!
//! These are consumed, not produced, by the storage engine. They are
//! delivered by an external transport; only the payload shape is
//! specified here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer lifecycle notifications from the tenancy system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomerEvent {
    /// A customer was provisioned; a storage account must be created.
    CustomerCreated {
        /// The customer identifier.
        customer_id: Uuid,
    },
    /// A customer was removed; the storage account and all files must
    /// be deleted.
    CustomerDeleted {
        /// The customer identifier.
        customer_id: Uuid,
    },
}

impl CustomerEvent {
    /// The customer this event concerns.
    pub fn customer_id(&self) -> Uuid {
        match self {
            Self::CustomerCreated { customer_id } | Self::CustomerDeleted { customer_id } => {
                *customer_id
            }
        }
    }
}
