//! Create battery material usage table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000003_create_batteries::Batteries;
use super::m20250301_000006_create_inventory_items::InventoryItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BatteryMaterialUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::BatteryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::InventoryItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::QuantityUsed)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::UnitCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::TotalCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::UsedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryMaterialUsage::UsedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BatteryMaterialUsage::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_usage_battery")
                            .from(BatteryMaterialUsage::Table, BatteryMaterialUsage::BatteryId)
                            .to(Batteries::Table, Batteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_usage_item")
                            .from(
                                BatteryMaterialUsage::Table,
                                BatteryMaterialUsage::InventoryItemId,
                            )
                            .to(InventoryItems::Table, InventoryItems::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_usage_user")
                            .from(BatteryMaterialUsage::Table, BatteryMaterialUsage::UsedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BatteryMaterialUsage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BatteryMaterialUsage {
    Table,
    Id,
    BatteryId,
    InventoryItemId,
    QuantityUsed,
    UnitCost,
    TotalCost,
    UsedBy,
    UsedAt,
    Notes,
}
