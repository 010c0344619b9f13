//! In-memory storage for development and testing
//!
//! DashMap-backed implementation of every repository trait plus the
//! provider. Ordering guarantees match the SeaORM implementation so tests
//! exercise the same contracts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::booking::{Booking, BookingRepository};
use crate::domain::checklist::{ChecklistRepository, ExitChecklist};
use crate::domain::maintenance::{MaintenanceRepository, MaintenanceRequest, MaintenanceStatus};
use crate::domain::user::{User, UserDevice, UserRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// In-memory repository provider
pub struct InMemoryStore {
    bookings: InMemoryBookingRepository,
    users: InMemoryUserRepository,
    checklists: InMemoryChecklistRepository,
    maintenance: InMemoryMaintenanceRepository,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: InMemoryBookingRepository::default(),
            users: InMemoryUserRepository::default(),
            checklists: InMemoryChecklistRepository::default(),
            maintenance: InMemoryMaintenanceRepository::default(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
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

// ── Bookings ────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: DashMap<String, Booking>,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking", "id", booking.id));
        }
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|b| b.stay.start);
        Ok(all)
    }

    async fn find_active(&self) -> DomainResult<Vec<Booking>> {
        let mut active: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| !e.value().is_cancelled())
            .map(|e| e.value().clone())
            .collect();
        active.sort_by_key(|b| b.stay.start);
        Ok(active)
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let mut mine: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        mine.sort_by_key(|b| b.stay.start);
        Ok(mine)
    }
}

// ── Users ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> DomainResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Validation(format!(
                "User already exists: {}",
                user.id
            )));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().email == email)
            .map(|e| e.value().clone()))
    }

    async fn find_by_auth_uid(&self, auth_uid: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().auth_uid.as_deref() == Some(auth_uid))
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut all: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update_profile(&self, user: User) -> DomainResult<()> {
        let Some(mut existing) = self.users.get_mut(&user.id) else {
            return Err(DomainError::not_found("User", "id", user.id));
        };
        // Device bindings are owned by bind_device / touch_device_login
        let current_device = existing.current_device.clone();
        let device_history = existing.device_history.clone();
        *existing = User {
            current_device,
            device_history,
            ..user
        };
        Ok(())
    }

    async fn bind_device(&self, user_id: &str, device: UserDevice) -> DomainResult<()> {
        let Some(mut user) = self.users.get_mut(user_id) else {
            return Err(DomainError::not_found("User", "id", user_id));
        };
        user.set_device(device);
        Ok(())
    }

    async fn touch_device_login(&self, user_id: &str, when: DateTime<Utc>) -> DomainResult<()> {
        let Some(mut user) = self.users.get_mut(user_id) else {
            return Err(DomainError::not_found("User", "id", user_id));
        };
        if let Some(device) = user.current_device.as_mut() {
            device.last_login = when;
        }
        user.touch();
        Ok(())
    }
}

// ── Checklists ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryChecklistRepository {
    checklists: DashMap<String, ExitChecklist>,
}

#[async_trait]
impl ChecklistRepository for InMemoryChecklistRepository {
    async fn save(&self, checklist: ExitChecklist) -> DomainResult<()> {
        self.checklists.insert(checklist.id.clone(), checklist);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ExitChecklist>> {
        Ok(self.checklists.get(id).map(|c| c.clone()))
    }

    async fn find_by_booking(&self, booking_id: &str) -> DomainResult<Option<ExitChecklist>> {
        Ok(self
            .checklists
            .iter()
            .find(|e| e.value().booking_id.as_deref() == Some(booking_id))
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ExitChecklist>> {
        let mut all: Vec<ExitChecklist> =
            self.checklists.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<ExitChecklist>> {
        let mut mine: Vec<ExitChecklist> = self
            .checklists
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn update(&self, checklist: ExitChecklist) -> DomainResult<()> {
        if !self.checklists.contains_key(&checklist.id) {
            return Err(DomainError::not_found("Checklist", "id", checklist.id));
        }
        self.checklists.insert(checklist.id.clone(), checklist);
        Ok(())
    }
}

// ── Maintenance ─────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryMaintenanceRepository {
    requests: DashMap<String, MaintenanceRequest>,
}

#[async_trait]
impl MaintenanceRepository for InMemoryMaintenanceRepository {
    async fn save(&self, request: MaintenanceRequest) -> DomainResult<()> {
        self.requests.insert(request.id.clone(), request);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<MaintenanceRequest>> {
        Ok(self.requests.get(id).map(|r| r.clone()))
    }

    async fn update(&self, request: MaintenanceRequest) -> DomainResult<()> {
        if !self.requests.contains_key(&request.id) {
            return Err(DomainError::not_found(
                "MaintenanceRequest",
                "id",
                request.id,
            ));
        }
        self.requests.insert(request.id.clone(), request);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<MaintenanceRequest>> {
        let mut all: Vec<MaintenanceRequest> =
            self.requests.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_status(
        &self,
        status: MaintenanceStatus,
    ) -> DomainResult<Vec<MaintenanceRequest>> {
        let mut matching: Vec<MaintenanceRequest> = self
            .requests
            .iter()
            .filter(|e| e.value().status == status)
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::StayRange;
    use chrono::{Duration, NaiveDate};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn bookings_sorted_by_start_date() {
        let store = InMemoryStore::new();
        let late = Booking::new("u", "U", StayRange::new(d(2026, 1, 10), d(2026, 1, 12)), None);
        let early = Booking::new("u", "U", StayRange::new(d(2026, 1, 1), d(2026, 1, 3)), None);
        store.bookings().save(late).await.unwrap();
        store.bookings().save(early).await.unwrap();

        let all = store.bookings().find_all().await.unwrap();
        assert_eq!(all[0].stay.start, d(2026, 1, 1));
        assert_eq!(all[1].stay.start, d(2026, 1, 10));
    }

    #[tokio::test]
    async fn find_active_excludes_cancelled() {
        let store = InMemoryStore::new();
        let mut b = Booking::new("u", "U", StayRange::new(d(2026, 1, 1), d(2026, 1, 3)), None);
        b.cancel();
        store.bookings().save(b).await.unwrap();

        assert!(store.bookings().find_active().await.unwrap().is_empty());
        assert_eq!(store.bookings().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_booking_is_not_found() {
        let store = InMemoryStore::new();
        let b = Booking::new("u", "U", StayRange::new(d(2026, 1, 1), d(2026, 1, 3)), None);
        assert!(matches!(
            store.bookings().update(b).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn bind_device_pushes_history() {
        let store = InMemoryStore::new();
        let user = User::new("dana@example.com", "Dana");
        let id = user.id.clone();
        store.users().save(user).await.unwrap();

        store
            .users()
            .bind_device(&id, UserDevice::new("dev-1", "phone", "ios", Utc::now()))
            .await
            .unwrap();
        store
            .users()
            .bind_device(&id, UserDevice::new("dev-2", "tablet", "android", Utc::now()))
            .await
            .unwrap();

        let user = store.users().find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(user.current_device.as_ref().unwrap().device_id, "dev-2");
        assert_eq!(user.device_history.len(), 1);
        assert_eq!(user.device_history[0].device_id, "dev-1");
    }

    #[tokio::test]
    async fn update_profile_preserves_device_binding() {
        let store = InMemoryStore::new();
        let user = User::new("dana@example.com", "Dana");
        let id = user.id.clone();
        store.users().save(user.clone()).await.unwrap();
        store
            .users()
            .bind_device(&id, UserDevice::new("dev-1", "phone", "ios", Utc::now()))
            .await
            .unwrap();

        let mut renamed = user;
        renamed.name = "Dana L".into();
        store.users().update_profile(renamed).await.unwrap();

        let user = store.users().find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(user.name, "Dana L");
        assert_eq!(user.current_device.as_ref().unwrap().device_id, "dev-1");
    }

    #[tokio::test]
    async fn touch_device_login_refreshes_stamp() {
        let store = InMemoryStore::new();
        let user = User::new("dana@example.com", "Dana");
        let id = user.id.clone();
        store.users().save(user).await.unwrap();

        let bound_at = Utc::now() - Duration::hours(5);
        store
            .users()
            .bind_device(&id, UserDevice::new("dev-1", "phone", "ios", bound_at))
            .await
            .unwrap();

        let later = Utc::now();
        store.users().touch_device_login(&id, later).await.unwrap();

        let user = store.users().find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(user.current_device.as_ref().unwrap().last_login, later);
    }

    #[tokio::test]
    async fn checklist_lookup_by_booking() {
        let store = InMemoryStore::new();
        let cl = ExitChecklist::new("u", "U", Some("booking-7".into()));
        store.checklists().save(cl.clone()).await.unwrap();

        let found = store
            .checklists()
            .find_by_booking("booking-7")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, cl.id);
        assert!(store
            .checklists()
            .find_by_booking("other")
            .await
            .unwrap()
            .is_none());
    }
}
