//! SeaORM implementation of MaintenanceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, warn};

use crate::domain::maintenance::{MaintenanceRepository, MaintenanceRequest, MaintenanceStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::maintenance_request;

pub struct SeaOrmMaintenanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaintenanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: maintenance_request::Model) -> MaintenanceRequest {
    let photo_urls = serde_json::from_str(&m.photo_urls).unwrap_or_else(|e| {
        warn!(request_id = %m.id, error = %e, "Unreadable photo_urls, treating as empty");
        Vec::new()
    });

    MaintenanceRequest {
        id: m.id,
        reporter_id: m.reporter_id,
        reporter_name: m.reporter_name,
        description: m.description,
        location: m.location,
        photo_urls,
        status: MaintenanceStatus::from_str(&m.status),
        assigned_to_id: m.assigned_to_id,
        assigned_to_name: m.assigned_to_name,
        resolution_notes: m.resolution_notes,
        resolution_date: m.resolution_date,
        completed_by_id: m.completed_by_id,
        completed_by_name: m.completed_by_name,
        reopen_reason: m.reopen_reason,
        reopened_by_id: m.reopened_by_id,
        reopened_by_name: m.reopened_by_name,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn to_active_model(r: &MaintenanceRequest) -> maintenance_request::ActiveModel {
    maintenance_request::ActiveModel {
        id: Set(r.id.clone()),
        reporter_id: Set(r.reporter_id.clone()),
        reporter_name: Set(r.reporter_name.clone()),
        description: Set(r.description.clone()),
        location: Set(r.location.clone()),
        photo_urls: Set(serde_json::to_string(&r.photo_urls).unwrap_or_else(|_| "[]".into())),
        status: Set(r.status.as_str().to_string()),
        assigned_to_id: Set(r.assigned_to_id.clone()),
        assigned_to_name: Set(r.assigned_to_name.clone()),
        resolution_notes: Set(r.resolution_notes.clone()),
        resolution_date: Set(r.resolution_date),
        completed_by_id: Set(r.completed_by_id.clone()),
        completed_by_name: Set(r.completed_by_name.clone()),
        reopen_reason: Set(r.reopen_reason.clone()),
        reopened_by_id: Set(r.reopened_by_id.clone()),
        reopened_by_name: Set(r.reopened_by_name.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── MaintenanceRepository impl ──────────────────────────────────

#[async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn save(&self, r: MaintenanceRequest) -> DomainResult<()> {
        debug!("Saving maintenance request: {}", r.id);
        to_active_model(&r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<MaintenanceRequest>> {
        let model = maintenance_request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: MaintenanceRequest) -> DomainResult<()> {
        debug!("Updating maintenance request: {}", r.id);

        let existing = maintenance_request::Entity::find_by_id(r.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("MaintenanceRequest", "id", r.id));
        }

        to_active_model(&r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<MaintenanceRequest>> {
        let models = maintenance_request::Entity::find()
            .order_by_desc(maintenance_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_status(
        &self,
        status: MaintenanceStatus,
    ) -> DomainResult<Vec<MaintenanceRequest>> {
        let models = maintenance_request::Entity::find()
            .filter(maintenance_request::Column::Status.eq(status.as_str()))
            .order_by_desc(maintenance_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
