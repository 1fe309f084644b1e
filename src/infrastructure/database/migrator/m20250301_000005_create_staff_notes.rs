//! Create battery staff notes table

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
                    .table(BatteryStaffNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatteryStaffNotes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BatteryStaffNotes::BatteryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BatteryStaffNotes::Note).text().not_null())
                    .col(
                        ColumnDef::new(BatteryStaffNotes::NoteType)
                            .string()
                            .not_null()
                            .default("followup"),
                    )
                    .col(
                        ColumnDef::new(BatteryStaffNotes::CreatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryStaffNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatteryStaffNotes::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_notes_battery")
                            .from(BatteryStaffNotes::Table, BatteryStaffNotes::BatteryId)
                            .to(Batteries::Table, Batteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_notes_user")
                            .from(BatteryStaffNotes::Table, BatteryStaffNotes::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BatteryStaffNotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BatteryStaffNotes {
    Table,
    Id,
    BatteryId,
    Note,
    NoteType,
    CreatedBy,
    CreatedAt,
    IsResolved,
}
