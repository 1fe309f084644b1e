//! Create battery status history table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000003_create_batteries::Batteries;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BatteryStatusHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatteryStatusHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BatteryStatusHistory::BatteryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryStatusHistory::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BatteryStatusHistory::Comments).text())
                    .col(
                        ColumnDef::new(BatteryStatusHistory::UpdatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryStatusHistory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_history_battery")
                            .from(
                                BatteryStatusHistory::Table,
                                BatteryStatusHistory::BatteryId,
                            )
                            .to(Batteries::Table, Batteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_history_user")
                            .from(
                                BatteryStatusHistory::Table,
                                BatteryStatusHistory::UpdatedBy,
                            )
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_status_history_battery")
                    .table(BatteryStatusHistory::Table)
                    .col(BatteryStatusHistory::BatteryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BatteryStatusHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BatteryStatusHistory {
    Table,
    Id,
    BatteryId,
    Status,
    Comments,
    UpdatedBy,
    UpdatedAt,
}
