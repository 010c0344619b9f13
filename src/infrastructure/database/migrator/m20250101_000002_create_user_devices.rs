//! Create user_devices table
//!
//! Holds the current device binding plus the append-only history of
//! superseded devices per user.

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
                    .table(UserDevices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDevices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserDevices::UserId).string().not_null())
                    .col(ColumnDef::new(UserDevices::DeviceId).string().not_null())
                    .col(ColumnDef::new(UserDevices::DeviceName).string().not_null())
                    .col(ColumnDef::new(UserDevices::Platform).string().not_null())
                    .col(
                        ColumnDef::new(UserDevices::LastLogin)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserDevices::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserDevices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_devices_user")
                            .from(UserDevices::Table, UserDevices::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_devices_user_id")
                    .table(UserDevices::Table)
                    .col(UserDevices::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserDevices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserDevices {
    Table,
    Id,
    UserId,
    DeviceId,
    DeviceName,
    Platform,
    LastLogin,
    IsCurrent,
    CreatedAt,
}
