//! Notification dispatcher
//!
//! Fire-and-forget delivery of per-user notifications. Delivery failures are
//! logged, never propagated to the caller; business operations must not fail
//! because a push could not be sent.

use async_trait::async_trait;

use super::event_bus::SharedEventBus;
use super::events::Event;

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver an event addressed to one user. Must not fail the caller.
    async fn send_to_user(&self, user_id: &str, event: Event);
}

/// Dispatcher that publishes onto the broadcast event bus. A push bridge
/// (FCM relay, realtime feed) subscribes on the other side and filters by
/// the event's user id.
pub struct EventBusDispatcher {
    bus: SharedEventBus,
}

impl EventBusDispatcher {
    pub fn new(bus: SharedEventBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl NotificationDispatcher for EventBusDispatcher {
    async fn send_to_user(&self, user_id: &str, event: Event) {
        tracing::debug!(user_id, event_type = event.event_type(), "Dispatching notification");
        self.bus.publish(event);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::event_bus::create_event_bus;
    use crate::notifications::events::ExitReminderEvent;
    use chrono::{NaiveDate, Utc};

    #[tokio::test]
    async fn dispatch_publishes_on_bus() {
        let bus = create_event_bus();
        let mut subscriber = bus.subscribe();
        let dispatcher = EventBusDispatcher::new(bus.clone());

        dispatcher
            .send_to_user(
                "user-1",
                Event::ExitReminderDue(ExitReminderEvent {
                    booking_id: "b-1".into(),
                    user_id: "user-1".into(),
                    user_name: "Dana".into(),
                    end_date: NaiveDate::from_ymd_opt(2025, 12, 17).unwrap(),
                    message: "Your stay ends today".into(),
                    timestamp: Utc::now(),
                }),
            )
            .await;

        let received =
            tokio::time::timeout(std::time::Duration::from_millis(100), subscriber.recv())
                .await
                .expect("Timeout")
                .expect("No message");
        assert_eq!(received.event.event_type(), "exit_reminder_due");
    }
}
