//! Backup snapshot document
//!
//! Flat field/value records, one list per table, with RFC 3339 timestamps.
//! The `id` fields are the synthetic ids at export time; restore rebuilds the
//! tables and remaps every foreign key through an old-id to new-id map, so
//! absolute ids are not preserved. Credentials are never exported.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub batteries: Vec<BatteryRecord>,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryRecord>,
    #[serde(default)]
    pub settings: Vec<SettingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub created_at: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub id: i32,
    pub battery_id: String,
    pub customer_id: i32,
    pub battery_type: String,
    pub voltage: String,
    pub capacity: String,
    pub status: String,
    pub inward_date: Option<String>,
    pub service_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryRecord {
    pub id: i32,
    pub battery_id: i32,
    pub status: String,
    pub comments: Option<String>,
    pub updated_by: i32,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingRecord {
    pub setting_key: String,
    pub setting_value: String,
    pub updated_at: Option<String>,
}
