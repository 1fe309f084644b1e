//! Application services
//!
//! One service per concern, each owning a database connection. HTTP handlers
//! (out of scope here) should be thin wrappers that delegate to these.

pub mod backup;
pub mod identity;
pub mod inventory;
pub mod lifecycle;
pub mod settings;

pub use backup::{BackupService, RestoreSummary, RESTORE_CONFIRMATION};
pub use identity::{IdentityService, NewUserInput};
pub use inventory::{InventoryService, NewItemInput};
pub use lifecycle::{IntakeInput, LifecycleService};
pub use settings::SettingsService;

#[cfg(test)]
pub(crate) mod test_support;
