//! Create stock transactions table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000006_create_inventory_items::InventoryItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockTransactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::InventoryItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::Quantity)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::UnitCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::TotalCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(StockTransactions::ReferenceId).string())
                    .col(ColumnDef::new(StockTransactions::Notes).text())
                    .col(
                        ColumnDef::new(StockTransactions::CreatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_transactions_item")
                            .from(StockTransactions::Table, StockTransactions::InventoryItemId)
                            .to(InventoryItems::Table, InventoryItems::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_transactions_user")
                            .from(StockTransactions::Table, StockTransactions::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_transactions_item")
                    .table(StockTransactions::Table)
                    .col(StockTransactions::InventoryItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum StockTransactions {
    Table,
    Id,
    InventoryItemId,
    TransactionType,
    Quantity,
    UnitCost,
    TotalCost,
    ReferenceId,
    Notes,
    CreatedBy,
    CreatedAt,
}
