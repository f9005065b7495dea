//! `SeaORM` Entity for student table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: i32,
    pub reg_no: String,
    pub name: String,
    pub year_id: i32,
    pub branch_id: i32,
    pub section_id: i32,
    pub exam_id: i32,
    pub hall_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    RegNo,
    Name,
    YearId,
    BranchId,
    SectionId,
    ExamId,
    HallId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
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
    Section,
    Exam,
    Hall,
    Attendance,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Integer.def(),
            Self::RegNo => ColumnType::String(StringLen::N(20)).def().unique(),
            Self::Name => ColumnType::String(StringLen::N(100)).def(),
            Self::YearId => ColumnType::Integer.def(),
            Self::BranchId => ColumnType::Integer.def(),
            Self::SectionId => ColumnType::Integer.def(),
            Self::ExamId => ColumnType::Integer.def(),
            Self::HallId => ColumnType::Integer.def(),
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
            Self::Section => Entity::belongs_to(super::section::Entity)
                .from(Column::SectionId)
                .to(super::section::Column::SectionId)
                .into(),
            Self::Exam => Entity::belongs_to(super::exam::Entity)
                .from(Column::ExamId)
                .to(super::exam::Column::ExamId)
                .into(),
            Self::Hall => Entity::belongs_to(super::hall::Entity)
                .from(Column::HallId)
                .to(super::hall::Column::HallId)
                .into(),
            Self::Attendance => Entity::has_one(super::attendance::Entity).into(),
        }
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::hall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hall.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
