//! Exit reminder scanner
//!
//! Background task that periodically sweeps the booking calendar and nudges
//! guests whose stay ends today (immediate reminder) or tomorrow (advance
//! notice) while their exit checklist is still open.
//!
//! Runs in a tokio::spawn loop. Store reads go through the retry helper so a
//! transient failure backs off instead of killing the task, and the loop
//! select!s on the shutdown signal for clean termination.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use metrics::counter;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::{DomainResult, RepositoryProvider};
use crate::notifications::events::ExitReminderEvent;
use crate::notifications::{Event, NotificationDispatcher};
use crate::shared::retry::{retry_with_backoff, RetryConfig};
use crate::shared::shutdown::ShutdownSignal;

/// Configuration for the reminder scanner
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// How often to sweep the calendar (in seconds)
    pub check_interval_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            // Hourly sweep
            check_interval_secs: 3600,
        }
    }
}

/// Kind of reminder produced by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// Stay ends today, checklist still open
    DueToday,
    /// Stay ends tomorrow, checklist still open
    DueTomorrow,
}

/// One reminder flagged by a scan
#[derive(Debug, Clone)]
pub struct Reminder {
    pub booking_id: String,
    pub user_id: String,
    pub user_name: String,
    pub end_date: NaiveDate,
    pub kind: ReminderKind,
}

/// Exit reminder scanner service
pub struct ExitReminderScanner {
    repos: Arc<dyn RepositoryProvider>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    config: ReminderConfig,
}

impl ExitReminderScanner {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            repos,
            dispatcher,
            config: ReminderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReminderConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the background sweep task.
    pub fn start(self: Arc<Self>, shutdown: ShutdownSignal) {
        let interval_secs = self.config.check_interval_secs;

        tokio::spawn(async move {
            info!(
                check_interval = interval_secs,
                "Exit reminder scanner started"
            );

            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = self.run_once().await {
                            warn!(error = %e, "Exit reminder sweep error");
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("Exit reminder scanner shutting down");
                        break;
                    }
                }
            }

            info!("Exit reminder scanner stopped");
        });
    }

    /// One full sweep: scan then dispatch.
    pub async fn run_once(&self) -> DomainResult<usize> {
        let reminders = retry_with_backoff(
            RetryConfig::default(),
            || self.scan_for_reminders(),
            |e| e.is_transient(),
            "exit_reminder_scan",
        )
        .await?;

        let count = reminders.len();
        if count > 0 {
            info!(count, "Exit reminders flagged");
        }
        self.dispatch(reminders).await;
        Ok(count)
    }

    /// Sweep the calendar for stays ending today or tomorrow without a
    /// submitted checklist. Read-only; dispatching and the `reminder_sent`
    /// marking happen in [`Self::dispatch`].
    pub async fn scan_for_reminders(&self) -> DomainResult<Vec<Reminder>> {
        let today = Utc::now().date_naive();
        let tomorrow = today + ChronoDuration::days(1);

        let bookings = self.repos.bookings().find_active().await?;
        let mut reminders = Vec::new();

        for booking in bookings {
            if booking.checklist_completed {
                continue;
            }
            let kind = if booking.stay.end == today {
                ReminderKind::DueToday
            } else if booking.stay.end == tomorrow {
                ReminderKind::DueTomorrow
            } else {
                continue;
            };
            reminders.push(Reminder {
                booking_id: booking.id,
                user_id: booking.user_id,
                user_name: booking.user_name,
                end_date: booking.stay.end,
                kind,
            });
        }

        Ok(reminders)
    }

    /// Deliver flagged reminders. Immediate reminders go to the dispatcher
    /// and mark the booking so the same stay is not re-notified on the next
    /// sweep; advance notices are published without marking. Per-booking
    /// failures are logged and do not abort the rest of the batch.
    async fn dispatch(&self, reminders: Vec<Reminder>) {
        for reminder in reminders {
            match reminder.kind {
                ReminderKind::DueToday => {
                    let already_sent = match self
                        .repos
                        .bookings()
                        .find_by_id(&reminder.booking_id)
                        .await
                    {
                        Ok(Some(b)) => b.reminder_sent,
                        Ok(None) => {
                            warn!(booking_id = %reminder.booking_id, "Booking vanished mid-sweep");
                            continue;
                        }
                        Err(e) => {
                            warn!(booking_id = %reminder.booking_id, error = %e, "Failed to load booking, skipping");
                            continue;
                        }
                    };
                    if already_sent {
                        continue;
                    }

                    self.dispatcher
                        .send_to_user(
                            &reminder.user_id,
                            Event::ExitReminderDue(ExitReminderEvent {
                                booking_id: reminder.booking_id.clone(),
                                user_id: reminder.user_id.clone(),
                                user_name: reminder.user_name.clone(),
                                end_date: reminder.end_date,
                                message:
                                    "Your stay ends today. Please complete the exit checklist before leaving."
                                        .to_string(),
                                timestamp: Utc::now(),
                            }),
                        )
                        .await;
                    counter!("homeshare_exit_reminders_sent_total").increment(1);
                    info!(
                        booking_id = %reminder.booking_id,
                        user_id = %reminder.user_id,
                        "Exit reminder sent"
                    );

                    if let Err(e) = self.mark_reminder_sent(&reminder.booking_id).await {
                        warn!(booking_id = %reminder.booking_id, error = %e, "Failed to mark reminder as sent");
                    }
                }
                ReminderKind::DueTomorrow => {
                    // Advance notice: published for subscribers, no marking
                    info!(
                        booking_id = %reminder.booking_id,
                        user_id = %reminder.user_id,
                        "Advance exit reminder due"
                    );
                    self.dispatcher
                        .send_to_user(
                            &reminder.user_id,
                            Event::ExitReminderUpcoming(ExitReminderEvent {
                                booking_id: reminder.booking_id.clone(),
                                user_id: reminder.user_id.clone(),
                                user_name: reminder.user_name.clone(),
                                end_date: reminder.end_date,
                                message: "Your stay ends tomorrow. Remember the exit checklist."
                                    .to_string(),
                                timestamp: Utc::now(),
                            }),
                        )
                        .await;
                }
            }
        }
    }

    async fn mark_reminder_sent(&self, booking_id: &str) -> DomainResult<()> {
        if let Some(mut booking) = self.repos.bookings().find_by_id(booking_id).await? {
            booking.mark_reminder_sent();
            self.repos.bookings().update(booking).await?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, StayRange};
    use crate::infrastructure::storage::InMemoryStore;
    use crate::notifications::{create_event_bus, EventBusDispatcher};

    fn booking_ending_in(days: i64, name: &str) -> Booking {
        let today = Utc::now().date_naive();
        Booking::new(
            format!("user-{name}"),
            name,
            StayRange::new(today + ChronoDuration::days(days - 3), today + ChronoDuration::days(days)),
            None,
        )
    }

    async fn scanner_with(
        bookings: Vec<Booking>,
    ) -> (Arc<InMemoryStore>, ExitReminderScanner, crate::notifications::EventSubscriber) {
        let store = Arc::new(InMemoryStore::new());
        for b in bookings {
            store.bookings().save(b).await.unwrap();
        }
        let bus = create_event_bus();
        let subscriber = bus.subscribe();
        let scanner =
            ExitReminderScanner::new(store.clone(), Arc::new(EventBusDispatcher::new(bus)));
        (store, scanner, subscriber)
    }

    #[tokio::test]
    async fn flags_stays_ending_today_and_tomorrow() {
        let (_, scanner, _sub) = scanner_with(vec![
            booking_ending_in(0, "today"),
            booking_ending_in(1, "tomorrow"),
            booking_ending_in(5, "later"),
        ])
        .await;

        let reminders = scanner.scan_for_reminders().await.unwrap();
        assert_eq!(reminders.len(), 2);

        let kinds: Vec<(String, ReminderKind)> = reminders
            .iter()
            .map(|r| (r.user_name.clone(), r.kind))
            .collect();
        assert!(kinds.contains(&("today".to_string(), ReminderKind::DueToday)));
        assert!(kinds.contains(&("tomorrow".to_string(), ReminderKind::DueTomorrow)));
    }

    #[tokio::test]
    async fn completed_checklist_suppresses_reminder() {
        let mut b = booking_ending_in(0, "today");
        b.mark_checklist_completed("cl-1");
        let (_, scanner, _sub) = scanner_with(vec![b]).await;

        assert!(scanner.scan_for_reminders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_booking_is_ignored() {
        let mut b = booking_ending_in(0, "today");
        b.cancel();
        let (_, scanner, _sub) = scanner_with(vec![b]).await;

        assert!(scanner.scan_for_reminders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_appears_once_then_not_after_submission() {
        let b = booking_ending_in(0, "today");
        let id = b.id.clone();
        let (store, scanner, _sub) = scanner_with(vec![b]).await;

        let first = scanner.scan_for_reminders().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].booking_id, id);

        let mut booking = store.bookings().find_by_id(&id).await.unwrap().unwrap();
        booking.mark_checklist_completed("cl-1");
        store.bookings().update(booking).await.unwrap();

        assert!(scanner.scan_for_reminders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dispatch_marks_reminder_sent_and_skips_next_time() {
        let b = booking_ending_in(0, "today");
        let id = b.id.clone();
        let (store, scanner, mut sub) = scanner_with(vec![b]).await;

        let sent = scanner.run_once().await.unwrap();
        assert_eq!(sent, 1);

        let msg = tokio::time::timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("Timeout")
            .expect("No message");
        assert_eq!(msg.event.event_type(), "exit_reminder_due");

        let booking = store.bookings().find_by_id(&id).await.unwrap().unwrap();
        assert!(booking.reminder_sent);

        // Second sweep still flags the stay but delivers nothing new
        scanner.run_once().await.unwrap();
        let second = tokio::time::timeout(Duration::from_millis(50), sub.recv()).await;
        assert!(second.is_err());
    }
}
