//! Notification events
//!
//! Defines all event types that can be broadcasted to subscribers (push
//! bridge, realtime UI feed).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Booking accepted onto the calendar
    BookingCreated(BookingEvent),
    /// Booking cancelled by its owner
    BookingCancelled(BookingEvent),
    /// Stay ends today and the exit checklist is still open
    ExitReminderDue(ExitReminderEvent),
    /// Stay ends tomorrow; advance notice
    ExitReminderUpcoming(ExitReminderEvent),
    /// Exit checklist submitted
    ChecklistSubmitted(ChecklistSubmittedEvent),
    /// New maintenance issue reported
    MaintenanceReported(MaintenanceEvent),
    /// Maintenance request changed status
    MaintenanceStatusChanged(MaintenanceStatusEvent),
    /// User logged in (device bound or refreshed)
    UserLoggedIn(UserLoggedInEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingCreated(_) => "booking_created",
            Event::BookingCancelled(_) => "booking_cancelled",
            Event::ExitReminderDue(_) => "exit_reminder_due",
            Event::ExitReminderUpcoming(_) => "exit_reminder_upcoming",
            Event::ChecklistSubmitted(_) => "checklist_submitted",
            Event::MaintenanceReported(_) => "maintenance_reported",
            Event::MaintenanceStatusChanged(_) => "maintenance_status_changed",
            Event::UserLoggedIn(_) => "user_logged_in",
        }
    }

    /// The user this event concerns, if any
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Event::BookingCreated(e) | Event::BookingCancelled(e) => Some(&e.user_id),
            Event::ExitReminderDue(e) | Event::ExitReminderUpcoming(e) => Some(&e.user_id),
            Event::ChecklistSubmitted(e) => Some(&e.user_id),
            Event::MaintenanceReported(e) => Some(&e.reporter_id),
            Event::MaintenanceStatusChanged(_) => None,
            Event::UserLoggedIn(e) => Some(&e.user_id),
        }
    }
}

/// Booking lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEvent {
    pub booking_id: String,
    pub user_id: String,
    pub user_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

/// Exit reminder event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitReminderEvent {
    pub booking_id: String,
    pub user_id: String,
    pub user_name: String,
    pub end_date: NaiveDate,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Checklist submitted event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSubmittedEvent {
    pub checklist_id: String,
    pub user_id: String,
    pub user_name: String,
    pub booking_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Maintenance reported event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub request_id: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Maintenance status change event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceStatusEvent {
    pub request_id: String,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

/// User login event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedInEvent {
    pub user_id: String,
    pub device_id: String,
    pub platform: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
