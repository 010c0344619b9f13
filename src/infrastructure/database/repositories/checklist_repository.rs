//! SeaORM implementation of ChecklistRepository
//!
//! Checklists are a header row plus entry rows. Updates replace the entry
//! set wholesale; entries are append-only in the domain so this stays cheap.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::checklist::{
    ChecklistEntry, ChecklistRepository, EntryCategory, ExitChecklist,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{checklist, checklist_entry};

pub struct SeaOrmChecklistRepository {
    db: DatabaseConnection,
}

impl SeaOrmChecklistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, model: checklist::Model) -> DomainResult<ExitChecklist> {
        let rows = checklist_entry::Entity::find()
            .filter(checklist_entry::Column::ChecklistId.eq(model.id.as_str()))
            .order_by_asc(checklist_entry::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let entries = rows
            .into_iter()
            .map(|row| ChecklistEntry {
                category: EntryCategory::from_str(&row.category),
                notes: row.notes,
                photo_url: row.photo_url,
                position: row.position as u32,
                created_at: row.created_at,
            })
            .collect();

        Ok(ExitChecklist {
            id: model.id,
            user_id: model.user_id,
            user_name: model.user_name,
            booking_id: model.booking_id,
            entries,
            important_notes: model.important_notes,
            is_complete: model.is_complete,
            submitted_at: model.submitted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn assemble_all(&self, models: Vec<checklist::Model>) -> DomainResult<Vec<ExitChecklist>> {
        let mut checklists = Vec::with_capacity(models.len());
        for model in models {
            checklists.push(self.assemble(model).await?);
        }
        Ok(checklists)
    }

    async fn insert_entries(&self, checklist_id: &str, entries: &[ChecklistEntry]) -> DomainResult<()> {
        for entry in entries {
            let row = checklist_entry::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                checklist_id: Set(checklist_id.to_string()),
                category: Set(entry.category.as_str().to_string()),
                notes: Set(entry.notes.clone()),
                photo_url: Set(entry.photo_url.clone()),
                position: Set(entry.position as i32),
                created_at: Set(entry.created_at),
            };
            row.insert(&self.db).await.map_err(db_err)?;
        }
        Ok(())
    }
}

fn to_active_model(c: &ExitChecklist) -> checklist::ActiveModel {
    checklist::ActiveModel {
        id: Set(c.id.clone()),
        user_id: Set(c.user_id.clone()),
        user_name: Set(c.user_name.clone()),
        booking_id: Set(c.booking_id.clone()),
        important_notes: Set(c.important_notes.clone()),
        is_complete: Set(c.is_complete),
        submitted_at: Set(c.submitted_at),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── ChecklistRepository impl ────────────────────────────────────

#[async_trait]
impl ChecklistRepository for SeaOrmChecklistRepository {
    async fn save(&self, c: ExitChecklist) -> DomainResult<()> {
        debug!("Saving checklist: {}", c.id);
        to_active_model(&c).insert(&self.db).await.map_err(db_err)?;
        self.insert_entries(&c.id, &c.entries).await
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ExitChecklist>> {
        let model = checklist::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => Ok(Some(self.assemble(m).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_booking(&self, booking_id: &str) -> DomainResult<Option<ExitChecklist>> {
        let model = checklist::Entity::find()
            .filter(checklist::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => Ok(Some(self.assemble(m).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<ExitChecklist>> {
        let models = checklist::Entity::find()
            .order_by_desc(checklist::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble_all(models).await
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<ExitChecklist>> {
        let models = checklist::Entity::find()
            .filter(checklist::Column::UserId.eq(user_id))
            .order_by_desc(checklist::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble_all(models).await
    }

    async fn update(&self, c: ExitChecklist) -> DomainResult<()> {
        debug!("Updating checklist: {}", c.id);

        let existing = checklist::Entity::find_by_id(c.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Checklist", "id", c.id));
        }

        to_active_model(&c).update(&self.db).await.map_err(db_err)?;

        checklist_entry::Entity::delete_many()
            .filter(checklist_entry::Column::ChecklistId.eq(c.id.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        self.insert_entries(&c.id, &c.entries).await
    }
}
