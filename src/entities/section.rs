//! `SeaORM` Entity for section table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "section"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub section_id: i32,
    pub section_name: String,
    pub year_id: i32,
    pub branch_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    SectionId,
    SectionName,
    YearId,
    BranchId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SectionId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Year,
    Branch,
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SectionId => ColumnType::Integer.def(),
            Self::SectionName => ColumnType::String(StringLen::N(10)).def(),
            Self::YearId => ColumnType::Integer.def(),
            Self::BranchId => ColumnType::Integer.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Year => Entity::belongs_to(super::year::Entity)
                .from(Column::YearId)
                .to(super::year::Column::YearId)
                .into(),
            Self::Branch => Entity::belongs_to(super::branch::Entity)
                .from(Column::BranchId)
                .to(super::branch::Column::BranchId)
                .into(),
            Self::Student => Entity::has_many(super::student::Entity).into(),
        }
    }
}

impl Related<super::year::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Year.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
