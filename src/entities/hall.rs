//! `SeaORM` Entity for hall table
//!
//! A hall row belongs to exactly one exam; the same room used for another
//! exam is a separate row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "hall"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub hall_id: i32,
    pub hall_no: String,
    pub exam_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    HallId,
    HallNo,
    ExamId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    HallId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Exam,
    Student,
    InvigilatorHall,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::HallId => ColumnType::Integer.def(),
            Self::HallNo => ColumnType::String(StringLen::N(20)).def(),
            Self::ExamId => ColumnType::Integer.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Exam => Entity::belongs_to(super::exam::Entity)
                .from(Column::ExamId)
                .to(super::exam::Column::ExamId)
                .into(),
            Self::Student => Entity::has_many(super::student::Entity).into(),
            Self::InvigilatorHall => Entity::has_many(super::invigilator_hall::Entity).into(),
        }
    }
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::invigilator_hall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvigilatorHall.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
