//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, warn};

use crate::domain::booking::{Booking, BookingRepository, BookingStatus, StayRange};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

/// Decode one row. Rows with unparseable dates are skipped (returning None)
/// so one malformed record cannot abort a whole sweep; the anomaly is
/// logged.
fn model_to_domain(m: booking::Model) -> Option<Booking> {
    let start = parse_date(&m.start_date, &m.id)?;
    let end = parse_date(&m.end_date, &m.id)?;

    Some(Booking {
        id: m.id,
        user_id: m.user_id,
        user_name: m.user_name,
        stay: StayRange::new(start, end),
        notes: m.notes,
        status: BookingStatus::from_str(&m.status),
        checklist_completed: m.checklist_completed,
        checklist_id: m.checklist_id,
        reminder_sent: m.reminder_sent,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn parse_date(raw: &str, booking_id: &str) -> Option<NaiveDate> {
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(booking_id, raw, error = %e, "Skipping booking with unparseable date");
            None
        }
    }
}

fn to_active_model(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        user_id: Set(b.user_id),
        user_name: Set(b.user_name),
        start_date: Set(b.stay.start.to_string()),
        end_date: Set(b.stay.end.to_string()),
        notes: Set(b.notes),
        status: Set(b.status.as_str().to_string()),
        checklist_completed: Set(b.checklist_completed),
        checklist_id: Set(b.checklist_id),
        reminder_sent: Set(b.reminder_sent),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<()> {
        debug!("Saving booking: {}", b.id);
        to_active_model(b).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.and_then(model_to_domain))
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking: {}", b.id);

        let existing = booking::Entity::find_by_id(b.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Booking", "id", b.id));
        }

        to_active_model(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        // ISO-8601 strings sort chronologically
        let models = booking::Entity::find()
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().filter_map(model_to_domain).collect())
    }

    async fn find_active(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Active.as_str()))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().filter_map(model_to_domain).collect())
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_asc(booking::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().filter_map(model_to_domain).collect())
    }
}
