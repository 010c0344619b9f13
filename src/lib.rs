//! # Homeshare
//!
//! Backend for a family-shared vacation house: stay bookings with conflict
//! detection, single-device login enforcement, exit checklists, maintenance
//! requests and an exit-reminder background scanner.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Business logic, services and background tasks
//! - **infrastructure**: External concerns (database, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT sessions and identity-token verification
//! - **notifications**: Broadcast events for push/realtime subscribers

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
