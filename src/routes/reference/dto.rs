use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::ExamSession;
use crate::entities::{branch, exam, hall, section, year};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamedRequest {
    #[schema(example = "II")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
}

impl From<year::Model> for NamedResponse {
    fn from(y: year::Model) -> Self {
        Self {
            id: y.year_id,
            name: y.year_name,
        }
    }
}

impl From<branch::Model> for NamedResponse {
    fn from(b: branch::Model) -> Self {
        Self {
            id: b.branch_id,
            name: b.branch_name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    #[schema(example = "A")]
    pub name: String,
    pub year_id: i32,
    pub branch_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub section_id: i32,
    pub name: String,
    pub year_id: i32,
    pub branch_id: i32,
}

impl From<section::Model> for SectionResponse {
    fn from(s: section::Model) -> Self {
        Self {
            section_id: s.section_id,
            name: s.section_name,
            year_id: s.year_id,
            branch_id: s.branch_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[schema(example = "Compiler Design")]
    pub subject: String,
    #[schema(value_type = String, example = "2026-05-04")]
    pub date: NaiveDate,
    #[serde(default)]
    pub session: ExamSession,
    #[schema(value_type = Option<String>, example = "09:30:00")]
    pub start_time: Option<NaiveTime>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamResponse {
    pub exam_id: i32,
    pub subject: String,
    #[schema(value_type = String)]
    pub date: NaiveDate,
    pub session: ExamSession,
    #[schema(value_type = Option<String>)]
    pub start_time: Option<NaiveTime>,
    pub label: String,
}

impl From<exam::Model> for ExamResponse {
    fn from(e: exam::Model) -> Self {
        Self {
            label: e.label(),
            exam_id: e.exam_id,
            subject: e.subject,
            date: e.date,
            session: e.session,
            start_time: e.start_time,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHallRequest {
    #[schema(example = "VKJ 101")]
    pub hall_no: String,
    pub exam_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HallResponse {
    pub hall_id: i32,
    pub hall_no: String,
    pub exam_id: i32,
}

impl From<hall::Model> for HallResponse {
    fn from(h: hall::Model) -> Self {
        Self {
            hall_id: h.hall_id,
            hall_no: h.hall_no,
            exam_id: h.exam_id,
        }
    }
}
