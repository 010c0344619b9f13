//! SeaORM implementation of UserRepository
//!
//! Users are stored as one row plus their device rows; the domain entity is
//! assembled from both. Device mutations only ever flip the `is_current`
//! flag and insert, so history rows are immutable once written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::user::{User, UserDevice, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{user, user_device};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, model: user::Model) -> DomainResult<User> {
        let rows = user_device::Entity::find()
            .filter(user_device::Column::UserId.eq(model.id.as_str()))
            .order_by_asc(user_device::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut current = None;
        let mut history = Vec::new();
        for row in rows {
            let device = UserDevice {
                device_id: row.device_id,
                device_name: row.device_name,
                platform: row.platform,
                last_login: row.last_login,
                is_active: row.is_current,
            };
            if row.is_current {
                current = Some(device);
            } else {
                history.push(device);
            }
        }

        Ok(User {
            id: model.id,
            email: model.email,
            name: model.name,
            role: UserRole::from_str(&model.role),
            preferred_language: model.preferred_language,
            is_active: model.is_active,
            auth_uid: model.auth_uid,
            notification_token: model.notification_token,
            current_device: current,
            device_history: history,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn assemble_opt(&self, model: Option<user::Model>) -> DomainResult<Option<User>> {
        match model {
            Some(m) => Ok(Some(self.assemble(m).await?)),
            None => Ok(None),
        }
    }
}

fn to_active_model(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id.clone()),
        email: Set(u.email.clone()),
        name: Set(u.name.clone()),
        role: Set(u.role.as_str().to_string()),
        preferred_language: Set(u.preferred_language.clone()),
        is_active: Set(u.is_active),
        auth_uid: Set(u.auth_uid.clone()),
        notification_token: Set(u.notification_token.clone()),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, u: User) -> DomainResult<()> {
        debug!("Saving user: {}", u.id);
        to_active_model(&u).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble_opt(model).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble_opt(model).await
    }

    async fn find_by_auth_uid(&self, auth_uid: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::AuthUid.eq(auth_uid))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble_opt(model).await
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut users = Vec::with_capacity(models.len());
        for model in models {
            users.push(self.assemble(model).await?);
        }
        Ok(users)
    }

    async fn update_profile(&self, u: User) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(u.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("User", "id", u.id));
        }

        to_active_model(&u).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn bind_device(&self, user_id: &str, device: UserDevice) -> DomainResult<()> {
        debug!(user_id, device_id = %device.device_id, "Binding device");

        let existing = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("User", "id", user_id));
        }

        // Demote the previous current device to history
        user_device::Entity::update_many()
            .col_expr(user_device::Column::IsCurrent, Expr::value(false))
            .filter(user_device::Column::UserId.eq(user_id))
            .filter(user_device::Column::IsCurrent.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let row = user_device::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            device_id: Set(device.device_id),
            device_name: Set(device.device_name),
            platform: Set(device.platform),
            last_login: Set(device.last_login),
            is_current: Set(true),
            created_at: Set(Utc::now()),
        };
        row.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn touch_device_login(&self, user_id: &str, when: DateTime<Utc>) -> DomainResult<()> {
        user_device::Entity::update_many()
            .col_expr(user_device::Column::LastLogin, Expr::value(when))
            .filter(user_device::Column::UserId.eq(user_id))
            .filter(user_device::Column::IsCurrent.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
