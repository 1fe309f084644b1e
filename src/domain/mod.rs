//! Domain layer - business entities, rules and errors

pub mod battery;
pub mod battery_code;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod note;
pub mod snapshot;
pub mod user;

pub use battery::{Battery, BatteryStatus, DeliveryKind, StatusHistoryEntry};
pub use battery_code::{next_battery_code, BatteryCodeConfig};
pub use customer::Customer;
pub use error::{DomainError, DomainResult};
pub use inventory::{InventoryItem, MaterialUsage, StockTransaction, StockTransactionType};
pub use note::{NoteType, StaffNote};
pub use snapshot::{
    BatteryRecord, CustomerRecord, SettingRecord, Snapshot, StatusHistoryRecord, UserRecord,
};
pub use user::{Operation, Role, User};
