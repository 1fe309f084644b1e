//! # Battery Repair Shop Core
//!
//! Record-keeping core for a small battery repair shop: customers, battery
//! intake and repair lifecycle, repair-material inventory, staff notes and
//! backup/restore.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the status transition table, the
//!   role permission table, the battery-code generator and the error taxonomy
//! - **application**: Services implementing the shop's use-cases
//! - **infrastructure**: Persistence (SeaORM entities, migrations) and
//!   password hashing
//!
//! The web layer is an external caller: it resolves the acting [`User`] from
//! its own session mechanism and invokes the services here. Every multi-step
//! mutation (status change + history row, stock movement + ledger row, full
//! restore) runs as a single database transaction.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::{DomainError, DomainResult};
pub use domain::{BatteryCodeConfig, BatteryStatus, DeliveryKind, NoteType, Role, User};

// Re-export database types for easy access
pub use infrastructure::{init_database, init_tracing, DatabaseConfig, Migrator};

// Re-export services for easy access
pub use application::services::{
    BackupService, IdentityService, InventoryService, LifecycleService, SettingsService,
};
