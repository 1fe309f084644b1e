//! Battery entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Battery repair status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BatteryStatus {
    #[sea_orm(string_value = "Received")]
    Received,
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Ready")]
    Ready,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
    #[sea_orm(string_value = "Returned")]
    Returned,
    #[sea_orm(string_value = "Not Repairable")]
    NotRepairable,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self::Received
    }
}

impl From<crate::domain::BatteryStatus> for BatteryStatus {
    fn from(status: crate::domain::BatteryStatus) -> Self {
        use crate::domain::BatteryStatus as D;
        match status {
            D::Received => Self::Received,
            D::Pending => Self::Pending,
            D::Ready => Self::Ready,
            D::Delivered => Self::Delivered,
            D::Returned => Self::Returned,
            D::NotRepairable => Self::NotRepairable,
        }
    }
}

impl From<BatteryStatus> for crate::domain::BatteryStatus {
    fn from(status: BatteryStatus) -> Self {
        match status {
            BatteryStatus::Received => Self::Received,
            BatteryStatus::Pending => Self::Pending,
            BatteryStatus::Ready => Self::Ready,
            BatteryStatus::Delivered => Self::Delivered,
            BatteryStatus::Returned => Self::Returned,
            BatteryStatus::NotRepairable => Self::NotRepairable,
        }
    }
}

/// Battery model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batteries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Human-readable code (BAT0001, BAT0002, ...)
    #[sea_orm(unique)]
    pub code: String,
    pub customer_id: i32,
    pub battery_type: String,
    pub voltage: String,
    pub capacity: String,
    pub status: BatteryStatus,
    pub inward_date: DateTime<Utc>,
    pub service_price: f64,
    pub pickup_charge: f64,
    pub is_pickup: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::status_history::Entity")]
    StatusHistory,
    #[sea_orm(has_many = "super::staff_note::Entity")]
    StaffNotes,
    #[sea_orm(has_many = "super::material_usage::Entity")]
    MaterialsUsed,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Battery {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            customer_id: model.customer_id,
            battery_type: model.battery_type,
            voltage: model.voltage,
            capacity: model.capacity,
            status: model.status.into(),
            inward_date: model.inward_date,
            service_price: model.service_price,
            pickup_charge: model.pickup_charge,
            is_pickup: model.is_pickup,
        }
    }
}
