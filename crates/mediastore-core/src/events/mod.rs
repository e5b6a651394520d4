//! Domain events published and consumed by the storage engine.
//!
//! Outbound events are fire-and-forget: the engines publish them
//! through [`crate::traits::notifier::EventNotifier`] and never depend
//! on delivery. Inbound customer lifecycle events live in
//! [`customer`].

pub mod customer;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use customer::CustomerEvent;

/// Types of outbound domain events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A file was created and moved into the managed bucket.
    FileCreated,
    /// A file was soft-deleted.
    FileDeleted,
    /// A storage account was created.
    AccountCreated,
    /// A storage account's usage counters changed.
    AccountUpdated,
    /// A storage account was soft-deleted.
    AccountDeleted,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileCreated => write!(f, "file_created"),
            Self::FileDeleted => write!(f, "file_deleted"),
            Self::AccountCreated => write!(f, "account_created"),
            Self::AccountUpdated => write!(f, "account_updated"),
            Self::AccountDeleted => write!(f, "account_deleted"),
        }
    }
}

/// A published domain event envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// The tenant the event belongs to.
    pub customer_id: uuid::Uuid,
    /// The event type.
    pub event_type: EventType,
    /// The serialized entity view.
    pub payload: serde_json::Value,
    /// When the event was produced.
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl DomainEvent {
    /// Create a new event envelope stamped with the current time.
    pub fn new(
        customer_id: uuid::Uuid,
        event_type: EventType,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            customer_id,
            event_type,
            payload,
            published_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_display() {
        assert_eq!(EventType::FileCreated.to_string(), "file_created");
        assert_eq!(EventType::AccountUpdated.to_string(), "account_updated");
    }

    #[test]
    fn test_envelope_round_trip() {
        let event = DomainEvent::new(
            uuid::Uuid::nil(),
            EventType::FileDeleted,
            serde_json::json!({"id": "x"}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type, EventType::FileDeleted);
        assert_eq!(back.customer_id, uuid::Uuid::nil());
    }
}
