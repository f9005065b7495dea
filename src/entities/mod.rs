//! `SeaORM` entities for the exam attendance schema

pub mod attendance;
pub mod branch;
pub mod exam;
pub mod hall;
pub mod invigilator;
pub mod invigilator_hall;
pub mod operator;
pub mod sea_orm_active_enums;
pub mod section;
pub mod student;
pub mod year;
