//! SeaORM repository implementations

mod booking_repository;
mod checklist_repository;
mod maintenance_repository;
mod repository_provider;
mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use checklist_repository::SeaOrmChecklistRepository;
pub use maintenance_repository::SeaOrmMaintenanceRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;
