//! Booking repository interface

use async_trait::async_trait;

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Update an existing booking
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// All bookings (any status), sorted by start date
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// All non-cancelled bookings, sorted by start date
    async fn find_active(&self) -> DomainResult<Vec<Booking>>;

    /// Bookings for one user, sorted by start date
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>>;
}
