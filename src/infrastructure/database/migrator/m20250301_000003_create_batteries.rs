//! Create batteries table

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_customers::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batteries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batteries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Batteries::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Batteries::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Batteries::BatteryType).string().not_null())
                    .col(ColumnDef::new(Batteries::Voltage).string().not_null())
                    .col(ColumnDef::new(Batteries::Capacity).string().not_null())
                    .col(
                        ColumnDef::new(Batteries::Status)
                            .string()
                            .not_null()
                            .default("Received"),
                    )
                    .col(
                        ColumnDef::new(Batteries::InwardDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Batteries::ServicePrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Batteries::PickupCharge)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Batteries::IsPickup)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batteries_customer")
                            .from(Batteries::Table, Batteries::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard and work queues filter by status
        manager
            .create_index(
                Index::create()
                    .name("idx_batteries_status")
                    .table(Batteries::Table)
                    .col(Batteries::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_batteries_customer")
                    .table(Batteries::Table)
                    .col(Batteries::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batteries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Batteries {
    Table,
    Id,
    Code,
    CustomerId,
    BatteryType,
    Voltage,
    Capacity,
    Status,
    InwardDate,
    ServicePrice,
    PickupCharge,
    IsPickup,
}
