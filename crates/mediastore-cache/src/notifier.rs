//! Redis pub/sub domain-event notifier.
//!
//! Events are serialized envelopes published on a single channel.
//! Delivery is fire-and-forget; subscribers that are not listening
//! simply miss the event.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use mediastore_core::config::notifier::NotifierConfig;
use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::events::{DomainEvent, EventType};
use mediastore_core::result::AppResult;
use mediastore_core::traits::notifier::EventNotifier;

/// Redis pub/sub backed event notifier.
#[derive(Debug, Clone)]
pub struct RedisEventNotifier {
    conn: redis::aio::ConnectionManager,
    channel: String,
}

impl RedisEventNotifier {
    /// Connect the notifier from configuration.
    pub async fn connect(config: &NotifierConfig) -> AppResult<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create notifier client", e)
        })?;

        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Cache, "Failed to connect notifier", e)
            })?;

        Ok(Self {
            conn,
            channel: config.channel.clone(),
        })
    }
}

#[async_trait]
impl EventNotifier for RedisEventNotifier {
    async fn publish(
        &self,
        customer_id: Uuid,
        event_type: EventType,
        payload: serde_json::Value,
    ) -> AppResult<()> {
        let envelope = DomainEvent::new(customer_id, event_type, payload);
        let message = serde_json::to_string(&envelope)?;

        let mut conn = self.conn.clone();
        redis::cmd("PUBLISH")
            .arg(&self.channel)
            .arg(&message)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Cache, format!("PUBLISH failed: {e}"), e)
            })?;

        debug!(%customer_id, %event_type, "Published domain event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_is_debug_and_clone() {
        fn assert_impl<T: std::fmt::Debug + Clone + Send + Sync>() {}
        assert_impl::<RedisEventNotifier>();
    }
}
