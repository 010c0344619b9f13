//! Maintenance request domain

mod model;
mod repository;

pub use model::{MaintenanceRequest, MaintenanceStatus, MAX_PHOTOS};
pub use repository::MaintenanceRepository;
