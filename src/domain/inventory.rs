//! Inventory: stocked materials and the stock ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stocked repair material.
///
/// `current_stock` always equals the opening stock plus the signed sum of all
/// ledger entries referencing the item; direct corrections go through an
/// `adjustment` entry so the invariant survives them.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: i32,
    pub item_name: String,
    pub item_code: String,
    pub category: String,
    /// Unit of measure (liters, pieces, kg, ...).
    pub unit: String,
    pub current_stock: f64,
    /// Reorder threshold. Display-only, never enforced.
    pub minimum_stock: f64,
    /// Latest known cost per unit (last-cost-wins, not weighted average).
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockTransactionType {
    Purchase,
    Usage,
    Adjustment,
    Return,
}

impl StockTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Usage => "usage",
            Self::Adjustment => "adjustment",
            Self::Return => "return",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "purchase" => Some(Self::Purchase),
            "usage" => Some(Self::Usage),
            "adjustment" => Some(Self::Adjustment),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

impl std::fmt::Display for StockTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable ledger entry. Quantity is signed: purchases and returns are
/// positive, usage negative, adjustments either way.
#[derive(Debug, Clone, PartialEq)]
pub struct StockTransaction {
    pub id: i32,
    pub inventory_item_id: i32,
    pub transaction_type: StockTransactionType,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    /// E.g. the battery code a usage entry was consumed by.
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Consumption of a material by one battery repair. Always paired 1:1 with a
/// `usage` ledger entry against the same item and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialUsage {
    pub id: i32,
    pub battery_id: i32,
    pub inventory_item_id: i32,
    pub quantity_used: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub used_by: i32,
    pub used_at: DateTime<Utc>,
    pub notes: Option<String>,
}
