//! One-way domain-event publisher trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::events::EventType;
use crate::result::AppResult;

/// Fire-and-forget publisher for domain events.
///
/// The engines call this after durable writes succeed but never depend
/// on delivery guarantees; a publish failure is the caller's to log,
/// not to propagate.
#[async_trait]
pub trait EventNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Publish one domain event for the given tenant.
    async fn publish(
        &self,
        customer_id: Uuid,
        event_type: EventType,
        payload: serde_json::Value,
    ) -> AppResult<()>;
}
