//! Maintenance request entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub reporter_id: String,
    pub reporter_name: String,

    pub description: String,
    pub location: String,

    /// JSON-encoded array of photo URLs
    pub photo_urls: String,

    /// Status: pending, in_progress, completed, cancelled
    pub status: String,

    #[sea_orm(nullable)]
    pub assigned_to_id: Option<String>,
    #[sea_orm(nullable)]
    pub assigned_to_name: Option<String>,

    #[sea_orm(nullable)]
    pub resolution_notes: Option<String>,
    #[sea_orm(nullable)]
    pub resolution_date: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub completed_by_id: Option<String>,
    #[sea_orm(nullable)]
    pub completed_by_name: Option<String>,

    #[sea_orm(nullable)]
    pub reopen_reason: Option<String>,
    #[sea_orm(nullable)]
    pub reopened_by_id: Option<String>,
    #[sea_orm(nullable)]
    pub reopened_by_name: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id"
    )]
    Reporter,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
