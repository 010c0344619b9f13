//! Create maintenance_requests table

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
                    .table(MaintenanceRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::ReporterId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::ReporterName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::Location)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::PhotoUrls)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(MaintenanceRequests::AssignedToId).string())
                    .col(ColumnDef::new(MaintenanceRequests::AssignedToName).string())
                    .col(ColumnDef::new(MaintenanceRequests::ResolutionNotes).string())
                    .col(
                        ColumnDef::new(MaintenanceRequests::ResolutionDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(MaintenanceRequests::CompletedById).string())
                    .col(ColumnDef::new(MaintenanceRequests::CompletedByName).string())
                    .col(ColumnDef::new(MaintenanceRequests::ReopenReason).string())
                    .col(ColumnDef::new(MaintenanceRequests::ReopenedById).string())
                    .col(ColumnDef::new(MaintenanceRequests::ReopenedByName).string())
                    .col(
                        ColumnDef::new(MaintenanceRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_requests_reporter")
                            .from(MaintenanceRequests::Table, MaintenanceRequests::ReporterId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_requests_status")
                    .table(MaintenanceRequests::Table)
                    .col(MaintenanceRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MaintenanceRequests {
    Table,
    Id,
    ReporterId,
    ReporterName,
    Description,
    Location,
    PhotoUrls,
    Status,
    AssignedToId,
    AssignedToName,
    ResolutionNotes,
    ResolutionDate,
    CompletedById,
    CompletedByName,
    ReopenReason,
    ReopenedById,
    ReopenedByName,
    CreatedAt,
    UpdatedAt,
}
