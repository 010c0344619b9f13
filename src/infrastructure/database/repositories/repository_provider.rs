//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::checklist::ChecklistRepository;
use crate::domain::maintenance::MaintenanceRepository;
use crate::domain::user::UserRepository;
use crate::domain::RepositoryProvider;

use super::booking_repository::SeaOrmBookingRepository;
use super::checklist_repository::SeaOrmChecklistRepository;
use super::maintenance_repository::SeaOrmMaintenanceRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    users: SeaOrmUserRepository,
    checklists: SeaOrmChecklistRepository,
    maintenance: SeaOrmMaintenanceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            checklists: SeaOrmChecklistRepository::new(db.clone()),
            maintenance: SeaOrmMaintenanceRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn checklists(&self) -> &dyn ChecklistRepository {
        &self.checklists
    }

    fn maintenance(&self) -> &dyn MaintenanceRepository {
        &self.maintenance
    }
}
