//! Create checklists table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Checklists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Checklists::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Checklists::UserId).string().not_null())
                    .col(ColumnDef::new(Checklists::UserName).string().not_null())
                    .col(ColumnDef::new(Checklists::BookingId).string())
                    .col(ColumnDef::new(Checklists::ImportantNotes).string())
                    .col(
                        ColumnDef::new(Checklists::IsComplete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Checklists::SubmittedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Checklists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Checklists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checklists_user")
                            .from(Checklists::Table, Checklists::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Checklists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Checklists {
    Table,
    Id,
    UserId,
    UserName,
    BookingId,
    ImportantNotes,
    IsComplete,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}
