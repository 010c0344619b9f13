//! Business logic, use cases and background tasks

pub mod services;

pub use services::{
    AuthService, BookingService, ChecklistService, DeviceInfo, ExitReminderScanner,
    LoginOutcome, MaintenanceService, Reminder, ReminderConfig, ReminderKind,
};
