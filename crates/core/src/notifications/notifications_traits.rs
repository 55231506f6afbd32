use async_trait::async_trait;

use super::notifications_model::Notification;
use crate::errors::Result;
use crate::events::DomainEvent;

/// Persistence contract for notifications.
///
/// Operations taking a `user_id` only see that user's notifications.
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn insert_notification(&self, notification: Notification) -> Result<Notification>;

    /// Newest first.
    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;

    fn count_unread(&self, user_id: &str) -> Result<i64>;

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;

    /// Returns the number of notifications that changed.
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<usize>;
}

/// Push delivery to the user's devices.
///
/// Delivery is best effort: callers log failures and move on.
#[async_trait]
pub trait PushDelivery: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<()>;
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Persists the notification for `event` and attempts push delivery.
    ///
    /// Only a failure to persist is returned; push failures are logged.
    async fn dispatch(&self, event: &DomainEvent) -> Result<Notification>;

    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;

    fn unread_count(&self, user_id: &str) -> Result<i64>;

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;

    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<()>;
}
