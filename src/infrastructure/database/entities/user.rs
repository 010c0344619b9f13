//! User entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,
    pub name: String,

    /// Role: family_member, maintenance, admin
    pub role: String,

    /// Display language: en, he
    pub preferred_language: String,

    pub is_active: bool,

    #[sea_orm(nullable)]
    pub auth_uid: Option<String>,

    #[sea_orm(nullable)]
    pub notification_token: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_device::Entity")]
    Devices,
}

impl Related<super::user_device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Devices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
