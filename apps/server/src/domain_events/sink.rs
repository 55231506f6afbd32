//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to the background queue worker.

use std::sync::{Arc, Mutex};

use goalgang_core::{
    events::{DomainEvent, DomainEventSink},
    notifications::NotificationServiceTrait,
};
use tokio::sync::mpsc;

use super::queue_worker::event_queue_worker;

/// Domain event sink for the web server runtime.
///
/// # Two-Phase Initialization
///
/// The goal and progress services need the sink, and the worker needs the
/// notification service, so the sink is built first:
///
/// 1. Create the sink with `new()` - this just creates the channel
/// 2. Call `start_worker()` after all services are created - this spawns the worker
pub struct NotificationEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl NotificationEventSink {
    /// Events emitted before `start_worker()` are buffered in the channel.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Spawns the worker. Later calls are ignored with a warning.
    pub fn start_worker(&self, notification_service: Arc<dyn NotificationServiceTrait>) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(rx) = rx else {
            tracing::warn!("Notification worker already started");
            return;
        };
        tokio::spawn(event_queue_worker(rx, notification_service));
    }
}

impl Default for NotificationEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for NotificationEventSink {
    fn emit(&self, event: DomainEvent) {
        // Only fails once the worker is gone, i.e. during shutdown.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(
                "Dropping domain event for goal {}: worker stopped",
                e.0.goal_id()
            );
        }
    }
}
