//! User entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "shop_staff")]
    ShopStaff,
    #[sea_orm(string_value = "technician")]
    Technician,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Technician
    }
}

impl From<crate::domain::Role> for UserRole {
    fn from(role: crate::domain::Role) -> Self {
        match role {
            crate::domain::Role::Admin => Self::Admin,
            crate::domain::Role::ShopStaff => Self::ShopStaff,
            crate::domain::Role::Technician => Self::Technician,
        }
    }
}

impl From<UserRole> for crate::domain::Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::ShopStaff => Self::ShopStaff,
            UserRole::Technician => Self::Technician,
        }
    }
}

/// User model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::status_history::Entity")]
    StatusUpdates,
    #[sea_orm(has_many = "super::staff_note::Entity")]
    StaffNotes,
}

impl Related<super::status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusUpdates.def()
    }
}

impl Related<super::staff_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffNotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The domain user never carries the password hash.
impl From<Model> for crate::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            role: model.role.into(),
            active: model.active,
            created_at: model.created_at,
        }
    }
}
