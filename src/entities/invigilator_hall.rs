//! `SeaORM` Entity for invigilator_hall join table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "invigilator_hall"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub invigilator_id: i32,
    pub hall_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    InvigilatorId,
    HallId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    InvigilatorId,
    HallId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = (i32, i32);
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invigilator,
    Hall,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::InvigilatorId => ColumnType::Integer.def(),
            Self::HallId => ColumnType::Integer.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Invigilator => Entity::belongs_to(super::invigilator::Entity)
                .from(Column::InvigilatorId)
                .to(super::invigilator::Column::InvigilatorId)
                .into(),
            Self::Hall => Entity::belongs_to(super::hall::Entity)
                .from(Column::HallId)
                .to(super::hall::Column::HallId)
                .into(),
        }
    }
}

impl Related<super::invigilator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invigilator.def()
    }
}

impl Related<super::hall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hall.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
