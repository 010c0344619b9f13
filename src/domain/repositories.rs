//! Repository provider
//!
//! Bundles the per-aggregate repositories behind one injectable trait so
//! services receive a single `Arc<dyn RepositoryProvider>` at the
//! composition root.

use super::booking::BookingRepository;
use super::checklist::ChecklistRepository;
use super::maintenance::MaintenanceRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn users(&self) -> &dyn UserRepository;
    fn checklists(&self) -> &dyn ChecklistRepository;
    fn maintenance(&self) -> &dyn MaintenanceRepository;
}
