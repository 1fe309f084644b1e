//! Stock transaction entity - the append-only inventory ledger

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TransactionType {
    #[sea_orm(string_value = "purchase")]
    Purchase,
    #[sea_orm(string_value = "usage")]
    Usage,
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    #[sea_orm(string_value = "return")]
    Return,
}

impl From<crate::domain::StockTransactionType> for TransactionType {
    fn from(t: crate::domain::StockTransactionType) -> Self {
        use crate::domain::StockTransactionType as D;
        match t {
            D::Purchase => Self::Purchase,
            D::Usage => Self::Usage,
            D::Adjustment => Self::Adjustment,
            D::Return => Self::Return,
        }
    }
}

impl From<TransactionType> for crate::domain::StockTransactionType {
    fn from(t: TransactionType) -> Self {
        match t {
            TransactionType::Purchase => Self::Purchase,
            TransactionType::Usage => Self::Usage,
            TransactionType::Adjustment => Self::Adjustment,
            TransactionType::Return => Self::Return,
        }
    }
}

/// Ledger entry. Quantity is signed; never updated after insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub inventory_item_id: i32,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::InventoryItemId",
        to = "super::inventory_item::Column::Id"
    )]
    InventoryItem,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::StockTransaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            inventory_item_id: model.inventory_item_id,
            transaction_type: model.transaction_type.into(),
            quantity: model.quantity,
            unit_cost: model.unit_cost,
            total_cost: model.total_cost,
            reference_id: model.reference_id,
            notes: model.notes,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
