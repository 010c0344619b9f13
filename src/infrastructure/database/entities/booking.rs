//! Booking entity
//!
//! Stay dates are stored as ISO-8601 text (the upstream data source kept
//! them as strings); the repository parses them and skips rows it cannot
//! parse instead of failing the whole query.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub user_id: String,
    pub user_name: String,

    /// Inclusive stay start, ISO-8601 date
    pub start_date: String,
    /// Inclusive stay end, ISO-8601 date
    pub end_date: String,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    /// Booking status: Active, Cancelled
    pub status: String,

    pub checklist_completed: bool,

    #[sea_orm(nullable)]
    pub checklist_id: Option<String>,

    pub reminder_sent: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
