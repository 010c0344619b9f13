//! Application services
//!
//! Business logic over the repository collaborators. Services are built at
//! the composition root with injected dependencies; no process-wide
//! singletons.

mod auth;
mod booking;
mod checklist;
mod exit_reminder;
mod maintenance;

pub use auth::{AuthService, DeviceInfo, LoginOutcome};
pub use booking::BookingService;
pub use checklist::ChecklistService;
pub use exit_reminder::{
    ExitReminderScanner, Reminder, ReminderConfig, ReminderKind,
};
pub use maintenance::MaintenanceService;
