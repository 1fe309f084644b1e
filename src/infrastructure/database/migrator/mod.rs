//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_customers;
mod m20250301_000003_create_batteries;
mod m20250301_000004_create_status_history;
mod m20250301_000005_create_staff_notes;
mod m20250301_000006_create_inventory_items;
mod m20250301_000007_create_stock_transactions;
mod m20250301_000008_create_material_usage;
mod m20250301_000009_create_system_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_customers::Migration),
            Box::new(m20250301_000003_create_batteries::Migration),
            Box::new(m20250301_000004_create_status_history::Migration),
            Box::new(m20250301_000005_create_staff_notes::Migration),
            Box::new(m20250301_000006_create_inventory_items::Migration),
            Box::new(m20250301_000007_create_stock_transactions::Migration),
            Box::new(m20250301_000008_create_material_usage::Migration),
            Box::new(m20250301_000009_create_system_settings::Migration),
        ]
    }
}
