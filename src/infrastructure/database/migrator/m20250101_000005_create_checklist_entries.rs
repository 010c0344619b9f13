//! Create checklist_entries table

use sea_orm_migration::prelude::*;

use super::m20250101_000004_create_checklists::Checklists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChecklistEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChecklistEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChecklistEntries::ChecklistId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChecklistEntries::Category)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChecklistEntries::Notes).string().not_null())
                    .col(ColumnDef::new(ChecklistEntries::PhotoUrl).string())
                    .col(
                        ColumnDef::new(ChecklistEntries::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ChecklistEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checklist_entries_checklist")
                            .from(ChecklistEntries::Table, ChecklistEntries::ChecklistId)
                            .to(Checklists::Table, Checklists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checklist_entries_checklist_id")
                    .table(ChecklistEntries::Table)
                    .col(ChecklistEntries::ChecklistId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChecklistEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChecklistEntries {
    Table,
    Id,
    ChecklistId,
    Category,
    Notes,
    PhotoUrl,
    Position,
    CreatedAt,
}
