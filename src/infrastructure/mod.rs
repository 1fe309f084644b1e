//! Infrastructure layer - persistence and crypto

pub mod crypto;
pub mod database;
pub mod telemetry;

pub use database::{init_database, DatabaseConfig, Migrator};
pub use telemetry::init_tracing;
