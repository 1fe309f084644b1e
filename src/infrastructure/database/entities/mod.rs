//! Database entities module

pub mod battery;
pub mod customer;
pub mod inventory_item;
pub mod material_usage;
pub mod staff_note;
pub mod status_history;
pub mod stock_transaction;
pub mod system_setting;
pub mod user;

pub use battery::Entity as Battery;
pub use customer::Entity as Customer;
pub use inventory_item::Entity as InventoryItem;
pub use material_usage::Entity as MaterialUsage;
pub use staff_note::Entity as StaffNote;
pub use status_history::Entity as StatusHistory;
pub use stock_transaction::Entity as StockTransaction;
pub use system_setting::Entity as SystemSetting;
pub use user::Entity as User;
