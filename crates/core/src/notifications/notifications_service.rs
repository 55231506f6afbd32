use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait, PushDelivery,
};
use crate::errors::{Error, Result};
use crate::events::DomainEvent;

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    push: Arc<dyn PushDelivery>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>, push: Arc<dyn PushDelivery>) -> Self {
        Self { repository, push }
    }
}

#[async_trait::async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn dispatch(&self, event: &DomainEvent) -> Result<Notification> {
        let notification = NewNotification::from_event(event)
            .into_notification(Uuid::new_v4().to_string(), Utc::now().naive_utc());
        let saved = self.repository.insert_notification(notification).await?;
        debug!(
            "Stored {} notification {} for user {}",
            saved.notification_type, saved.id, saved.user_id
        );

        if let Err(e) = self.push.deliver(&saved).await {
            warn!(
                "Push delivery failed for notification {} (user {}): {}",
                saved.id, saved.user_id, e
            );
        }
        Ok(saved)
    }

    fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        self.repository.list_notifications(user_id, unread_only)
    }

    fn unread_count(&self, user_id: &str) -> Result<i64> {
        self.repository.count_unread(user_id)
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        self.repository.mark_read(user_id, notification_id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.repository.mark_all_read(user_id).await
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_notification(user_id, notification_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound("Notification".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationType;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockNotificationRepository {
        rows: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationRepositoryTrait for MockNotificationRepository {
        async fn insert_notification(&self, notification: Notification) -> Result<Notification> {
            self.rows.lock().unwrap().push(notification.clone());
            Ok(notification)
        }

        fn list_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
                .cloned()
                .collect())
        }

        fn count_unread(&self, user_id: &str) -> Result<i64> {
            Ok(self.list_notifications(user_id, true)?.len() as i64)
        }

        async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|n| n.id == notification_id && n.user_id == user_id)
                .ok_or_else(|| Error::NotFound("Notification".to_string()))?;
            row.is_read = true;
            Ok(row.clone())
        }

        async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
            let mut rows = self.rows.lock().unwrap();
            let mut changed = 0;
            for row in rows.iter_mut().filter(|n| n.user_id == user_id && !n.is_read) {
                row.is_read = true;
                changed += 1;
            }
            Ok(changed)
        }

        async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<usize> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|n| !(n.id == notification_id && n.user_id == user_id));
            Ok(before - rows.len())
        }
    }

    struct CountingPush {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PushDelivery for CountingPush {
        async fn deliver(&self, _notification: &Notification) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Unexpected("push gateway unavailable".to_string()));
            }
            Ok(())
        }
    }

    fn service(fail_push: bool) -> (NotificationService, Arc<CountingPush>) {
        let push = Arc::new(CountingPush {
            calls: AtomicUsize::new(0),
            fail: fail_push,
        });
        let service = NotificationService::new(
            Arc::new(MockNotificationRepository::default()),
            push.clone(),
        );
        (service, push)
    }

    fn completed_event(user_id: &str) -> DomainEvent {
        DomainEvent::GoalCompleted {
            user_id: user_id.to_string(),
            goal_id: "g1".to_string(),
            goal_title: "Save".to_string(),
            was_surpassed: false,
        }
    }

    #[tokio::test]
    async fn test_dispatch_persists_and_pushes() {
        let (service, push) = service(false);
        let saved = service.dispatch(&completed_event("u1")).await.unwrap();

        assert_eq!(saved.notification_type, NotificationType::GoalCompleted);
        assert!(!saved.is_read);
        assert_eq!(push.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.list_notifications("u1", false).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_push_failure_does_not_fail_dispatch() {
        let (service, push) = service(true);
        let saved = service.dispatch(&completed_event("u1")).await;

        assert!(saved.is_ok());
        assert_eq!(push.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.unread_count("u1").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_read_state_is_scoped_to_owner() {
        let (service, _) = service(false);
        let mine = service.dispatch(&completed_event("u1")).await.unwrap();
        service.dispatch(&completed_event("u1")).await.unwrap();
        service.dispatch(&completed_event("u2")).await.unwrap();

        let err = service.mark_read("u2", &mine.id).await.unwrap_err();
        assert!(err.is_not_found());

        let read = service.mark_read("u1", &mine.id).await.unwrap();
        assert!(read.is_read);
        assert_eq!(service.unread_count("u1").unwrap(), 1);
        assert_eq!(service.list_notifications("u1", true).unwrap().len(), 1);

        assert_eq!(service.mark_all_read("u1").await.unwrap(), 1);
        assert_eq!(service.unread_count("u1").unwrap(), 0);
        assert_eq!(service.unread_count("u2").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_notification_is_not_found() {
        let (service, _) = service(false);
        let saved = service.dispatch(&completed_event("u1")).await.unwrap();

        let err = service
            .delete_notification("u2", &saved.id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        service.delete_notification("u1", &saved.id).await.unwrap();
        assert!(service.list_notifications("u1", false).unwrap().is_empty());
    }
}
