//! `SeaORM` Entity for operator table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OperatorRole;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "operator"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub operator_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: OperatorRole,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    OperatorId,
    Username,
    Password,
    Role,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    OperatorId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invigilator,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::OperatorId => ColumnType::Integer.def(),
            Self::Username => ColumnType::String(StringLen::N(150)).def().unique(),
            Self::Password => ColumnType::String(StringLen::None).def(),
            Self::Role => ColumnType::String(StringLen::N(16)).def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Invigilator => Entity::has_one(super::invigilator::Entity).into(),
        }
    }
}

impl Related<super::invigilator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invigilator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
