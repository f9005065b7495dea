//! `SeaORM` Entity for invigilator table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "invigilator"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub invigilator_id: i32,
    pub operator_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    InvigilatorId,
    OperatorId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    InvigilatorId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Operator,
    InvigilatorHall,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::InvigilatorId => ColumnType::Integer.def(),
            Self::OperatorId => ColumnType::Integer.def().unique(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Operator => Entity::belongs_to(super::operator::Entity)
                .from(Column::OperatorId)
                .to(super::operator::Column::OperatorId)
                .into(),
            Self::InvigilatorHall => Entity::has_many(super::invigilator_hall::Entity).into(),
        }
    }
}

impl Related<super::operator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::invigilator_hall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvigilatorHall.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
