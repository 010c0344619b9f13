//! Database migrator

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_user_devices;
mod m20250101_000003_create_bookings;
mod m20250101_000004_create_checklists;
mod m20250101_000005_create_checklist_entries;
mod m20250101_000006_create_maintenance_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_user_devices::Migration),
            Box::new(m20250101_000003_create_bookings::Migration),
            Box::new(m20250101_000004_create_checklists::Migration),
            Box::new(m20250101_000005_create_checklist_entries::Migration),
            Box::new(m20250101_000006_create_maintenance_requests::Migration),
        ]
    }
}
