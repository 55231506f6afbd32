//! Event queue worker for processing domain events.

use std::sync::Arc;

use goalgang_core::{events::DomainEvent, notifications::NotificationServiceTrait};
use tokio::sync::mpsc;

/// Drains the channel in arrival order until every sender is dropped.
///
/// A failed dispatch is logged and the worker moves on; the goal write that
/// produced the event has already committed.
pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    notification_service: Arc<dyn NotificationServiceTrait>,
) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        match notification_service.dispatch(&event).await {
            Ok(notification) => tracing::debug!(
                "Dispatched {} notification {} for goal {}",
                notification.notification_type,
                notification.id,
                event.goal_id()
            ),
            Err(e) => tracing::error!(
                "Failed to store notification for goal {} (user {}): {}",
                event.goal_id(),
                event.user_id(),
                e
            ),
        }
    }

    tracing::info!("Domain event queue worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use goalgang_core::errors::{Error, Result};
    use goalgang_core::notifications::{NewNotification, Notification};

    #[derive(Default)]
    struct RecordingService {
        dispatched: Mutex<Vec<DomainEvent>>,
        fail_first: Mutex<bool>,
    }

    #[async_trait]
    impl NotificationServiceTrait for RecordingService {
        async fn dispatch(&self, event: &DomainEvent) -> Result<Notification> {
            {
                let mut fail = self.fail_first.lock().unwrap();
                if *fail {
                    *fail = false;
                    return Err(Error::Unexpected("disk full".to_string()));
                }
            }
            self.dispatched.lock().unwrap().push(event.clone());
            Ok(NewNotification::from_event(event)
                .into_notification("n1".to_string(), Utc::now().naive_utc()))
        }

        fn list_notifications(&self, _: &str, _: bool) -> Result<Vec<Notification>> {
            Ok(vec![])
        }

        fn unread_count(&self, _: &str) -> Result<i64> {
            Ok(0)
        }

        async fn mark_read(&self, _: &str, _: &str) -> Result<Notification> {
            Err(Error::NotFound("Notification".to_string()))
        }

        async fn mark_all_read(&self, _: &str) -> Result<usize> {
            Ok(0)
        }

        async fn delete_notification(&self, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
    }

    fn completed(goal_id: &str) -> DomainEvent {
        DomainEvent::GoalCompleted {
            user_id: "u1".to_string(),
            goal_id: goal_id.to_string(),
            goal_title: "Run".to_string(),
            was_surpassed: false,
        }
    }

    #[tokio::test]
    async fn test_worker_keeps_going_after_failed_dispatch() {
        let service = Arc::new(RecordingService {
            fail_first: Mutex::new(true),
            ..Default::default()
        });
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(completed("g1")).unwrap();
        tx.send(completed("g2")).unwrap();
        drop(tx);

        event_queue_worker(rx, service.clone()).await;

        let dispatched = service.dispatched.lock().unwrap();
        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0].goal_id(), "g2");
    }
}
