//! `SeaORM` Entity for exam table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExamSession;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "exam"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub exam_id: i32,
    pub subject: String,
    pub date: Date,
    pub session: ExamSession,
    pub start_time: Option<Time>,
}

impl Model {
    /// `"<subject> - <date> - <session>"`
    pub fn label(&self) -> String {
        format!("{} - {} - {}", self.subject, self.date, self.session)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    ExamId,
    Subject,
    Date,
    Session,
    StartTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ExamId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Hall,
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ExamId => ColumnType::Integer.def(),
            Self::Subject => ColumnType::String(StringLen::N(100)).def(),
            Self::Date => ColumnType::Date.def(),
            Self::Session => ColumnType::String(StringLen::N(20)).def(),
            Self::StartTime => ColumnType::Time.def().null(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Hall => Entity::has_many(super::hall::Entity).into(),
            Self::Student => Entity::has_many(super::student::Entity).into(),
        }
    }
}

impl Related<super::hall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hall.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
