//! Push delivery adapters.

use async_trait::async_trait;
use goalgang_core::{errors::Result, notifications::Notification, notifications::PushDelivery};

/// Stands in for a device push provider: records the delivery in the log.
#[derive(Default)]
pub struct LoggingPushDelivery;

#[async_trait]
impl PushDelivery for LoggingPushDelivery {
    async fn deliver(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            user_id = %notification.user_id,
            notification_id = %notification.id,
            kind = %notification.notification_type,
            "push: {}",
            notification.title
        );
        Ok(())
    }
}
