//! Battery staff note entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum NoteType {
    #[sea_orm(string_value = "followup")]
    Followup,
    #[sea_orm(string_value = "reminder")]
    Reminder,
    #[sea_orm(string_value = "issue")]
    Issue,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

impl Default for NoteType {
    fn default() -> Self {
        Self::Followup
    }
}

impl From<crate::domain::NoteType> for NoteType {
    fn from(t: crate::domain::NoteType) -> Self {
        use crate::domain::NoteType as D;
        match t {
            D::Followup => Self::Followup,
            D::Reminder => Self::Reminder,
            D::Issue => Self::Issue,
            D::Resolved => Self::Resolved,
        }
    }
}

impl From<NoteType> for crate::domain::NoteType {
    fn from(t: NoteType) -> Self {
        match t {
            NoteType::Followup => Self::Followup,
            NoteType::Reminder => Self::Reminder,
            NoteType::Issue => Self::Issue,
            NoteType::Resolved => Self::Resolved,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "battery_staff_notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub battery_id: i32,
    pub note: String,
    pub note_type: NoteType,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub is_resolved: bool,
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
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::battery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Battery.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::StaffNote {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            battery_id: model.battery_id,
            note: model.note,
            note_type: model.note_type.into(),
            created_by: model.created_by,
            created_at: model.created_at,
            is_resolved: model.is_resolved,
        }
    }
}
