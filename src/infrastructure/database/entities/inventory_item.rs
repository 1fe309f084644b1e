//! Inventory item entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_name: String,
    #[sea_orm(unique)]
    pub item_code: String,
    /// acid, plates, separators, terminals, ...
    pub category: String,
    /// liters, pieces, kg, ...
    pub unit: String,
    pub current_stock: f64,
    pub minimum_stock: f64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_transaction::Entity")]
    StockTransactions,
    #[sea_orm(has_many = "super::material_usage::Entity")]
    MaterialUsage,
}

impl Related<super::stock_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockTransactions.def()
    }
}

impl Related<super::material_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::InventoryItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            item_name: model.item_name,
            item_code: model.item_code,
            category: model.category,
            unit: model.unit,
            current_stock: model.current_stock,
            minimum_stock: model.minimum_stock,
            unit_cost: model.unit_cost,
            supplier: model.supplier,
            created_at: model.created_at,
            last_updated: model.last_updated,
            active: model.active,
        }
    }
}
