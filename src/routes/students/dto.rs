use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::student;
use crate::error::RowError;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct StudentQueryParams {
    pub exam: Option<i32>,
    pub hall: Option<i32>,
    pub section: Option<i32>,
    /// Matches registration number or name
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub student_id: i32,
    pub reg_no: String,
    pub name: String,
    pub year_id: i32,
    pub branch_id: i32,
    pub section_id: i32,
    pub exam_id: i32,
    pub hall_id: i32,
}

impl From<student::Model> for StudentResponse {
    fn from(s: student::Model) -> Self {
        Self {
            student_id: s.student_id,
            reg_no: s.reg_no,
            name: s.name,
            year_id: s.year_id,
            branch_id: s.branch_id,
            section_id: s.section_id,
            exam_id: s.exam_id,
            hall_id: s.hall_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total: usize,
}

/// Body of a 422 upload response. Nothing was written.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRejection {
    pub message: String,
    pub errors: Vec<RowError>,
}
