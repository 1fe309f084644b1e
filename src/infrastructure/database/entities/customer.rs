//! Customer entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub mobile_secondary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::battery::Entity")]
    Batteries,
}

impl Related<super::battery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batteries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Customer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            mobile: model.mobile,
            mobile_secondary: model.mobile_secondary,
            created_at: model.created_at,
        }
    }
}
