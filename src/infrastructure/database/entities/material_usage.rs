//! Battery material usage entity
//!
//! Paired 1:1 with a `usage` stock transaction against the same item and
//! quantity, written in the same database transaction.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "battery_material_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::battery::Entity",
        from = "Column::BatteryId",
        to = "super::battery::Column::Id"
    )]
    Battery,
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::InventoryItemId",
        to = "super::inventory_item::Column::Id"
    )]
    InventoryItem,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UsedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::battery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Battery.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::MaterialUsage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            battery_id: model.battery_id,
            inventory_item_id: model.inventory_item_id,
            quantity_used: model.quantity_used,
            unit_cost: model.unit_cost,
            total_cost: model.total_cost,
            used_by: model.used_by,
            used_at: model.used_at,
            notes: model.notes,
        }
    }
}
