//! Admin-facing attendance views and the spreadsheet export.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{exam, student};
use crate::error::ServiceError;
use crate::repositories::{
    AttendanceRepository, BranchRepository, ExamRepository, HallRepository, SectionRepository,
    YearRepository,
};
use crate::services::spreadsheet::{self, ExportRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub attendance_id: i32,
    pub reg_no: String,
    pub name: String,
    pub exam_id: i32,
    pub exam: String,
    pub hall_no: String,
    pub status: AttendanceStatus,
    #[schema(value_type = String)]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamOption {
    pub exam_id: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub records: Vec<DashboardRow>,
    pub exams: Vec<ExamOption>,
    pub selected_exam: Option<i32>,
    pub total: u64,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbsentStudent {
    pub student_id: i32,
    pub reg_no: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionAbsentees {
    pub section_id: i32,
    /// "Year - Branch - Section"
    pub section: String,
    pub students: Vec<AbsentStudent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionAbsenteeReport {
    pub exam_id: i32,
    pub exam: String,
    pub sections: Vec<SectionAbsentees>,
}

/// A rendered export, ready to be served.
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn export_filename(exam_id: i32) -> String {
    format!("attendance_{}.xlsx", exam_id)
}

pub struct Reporting<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Reporting<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_exam(&self, exam_id: i32) -> Result<exam::Model, ServiceError> {
        ExamRepository::new(self.db)
            .find_by_id(exam_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Exam", exam_id))
    }

    /// Attendance records by registration number, optionally for one exam.
    /// `page` is `(page, page_size)`, 1-based; `None` returns every row.
    pub async fn dashboard(
        &self,
        exam_id: Option<i32>,
        page: Option<(u64, u64)>,
    ) -> Result<Dashboard, ServiceError> {
        if let Some((number, size)) = page {
            if number == 0 || size == 0 {
                return Err(ServiceError::MalformedInput(
                    "page and pageSize must be positive".to_string(),
                ));
            }
            let offset = (number - 1).checked_mul(size);
            if !offset.is_some_and(|o| i64::try_from(o).is_ok()) {
                return Err(ServiceError::MalformedInput(
                    "page is out of range".to_string(),
                ));
            }
        }

        let exams = ExamRepository::new(self.db).find_all().await?;
        let labels: HashMap<i32, String> =
            exams.iter().map(|e| (e.exam_id, e.label())).collect();
        let hall_numbers: HashMap<i32, String> = HallRepository::new(self.db)
            .find_all()
            .await?
            .into_iter()
            .map(|h| (h.hall_id, h.hall_no))
            .collect();

        let attendance = AttendanceRepository::new(self.db);
        let total = attendance.count_for_exam(exam_id).await?;
        let rows = attendance.find_with_students(exam_id, page).await?;

        let records = rows
            .into_iter()
            .map(|(record, student)| DashboardRow {
                attendance_id: record.attendance_id,
                exam: labels.get(&student.exam_id).cloned().unwrap_or_default(),
                hall_no: hall_numbers
                    .get(&student.hall_id)
                    .cloned()
                    .unwrap_or_default(),
                exam_id: student.exam_id,
                reg_no: student.reg_no,
                name: student.name,
                status: record.status,
                timestamp: record.timestamp,
            })
            .collect();

        Ok(Dashboard {
            records,
            exams: exams
                .iter()
                .map(|e| ExamOption {
                    exam_id: e.exam_id,
                    label: e.label(),
                })
                .collect(),
            selected_exam: exam_id,
            total,
            page: page.map(|(number, _)| number),
            page_size: page.map(|(_, size)| size),
        })
    }

    /// Absent students of the exam grouped by section. Sections without
    /// absentees are left out.
    pub async fn section_absentees(
        &self,
        exam_id: i32,
    ) -> Result<SectionAbsenteeReport, ServiceError> {
        let exam = self.require_exam(exam_id).await?;
        let absentees = AttendanceRepository::new(self.db)
            .find_absentees(exam_id)
            .await?;

        let mut by_section: BTreeMap<i32, Vec<student::Model>> = BTreeMap::new();
        for student in absentees {
            by_section.entry(student.section_id).or_default().push(student);
        }

        let years: HashMap<i32, String> = YearRepository::new(self.db)
            .find_all()
            .await?
            .into_iter()
            .map(|y| (y.year_id, y.year_name))
            .collect();
        let branches: HashMap<i32, String> = BranchRepository::new(self.db)
            .find_all()
            .await?
            .into_iter()
            .map(|b| (b.branch_id, b.branch_name))
            .collect();
        let section_labels: HashMap<i32, String> = SectionRepository::new(self.db)
            .find_all()
            .await?
            .into_iter()
            .map(|s| {
                let label = format!(
                    "{} - {} - {}",
                    years.get(&s.year_id).map(String::as_str).unwrap_or("?"),
                    branches.get(&s.branch_id).map(String::as_str).unwrap_or("?"),
                    s.section_name
                );
                (s.section_id, label)
            })
            .collect();

        let sections = by_section
            .into_iter()
            .map(|(section_id, students)| SectionAbsentees {
                section_id,
                section: section_labels
                    .get(&section_id)
                    .cloned()
                    .unwrap_or_default(),
                students: students
                    .into_iter()
                    .map(|s| AbsentStudent {
                        student_id: s.student_id,
                        reg_no: s.reg_no,
                        name: s.name,
                    })
                    .collect(),
            })
            .collect();

        Ok(SectionAbsenteeReport {
            exam_id,
            exam: exam.label(),
            sections,
        })
    }

    /// Export rows for the exam in registration-number order.
    pub async fn export_rows(&self, exam_id: i32) -> Result<Vec<ExportRow>, ServiceError> {
        self.require_exam(exam_id).await?;
        let rows = AttendanceRepository::new(self.db)
            .find_with_students(Some(exam_id), None)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(record, student)| ExportRow {
                reg_no: student.reg_no,
                name: student.name,
                status: record.status.to_string(),
            })
            .collect())
    }

    pub async fn export_workbook(&self, exam_id: i32) -> Result<ExportFile, ServiceError> {
        let rows = self.export_rows(exam_id).await?;
        let bytes = spreadsheet::write_attendance(&rows)?;

        tracing::info!(exam_id, rows = rows.len(), "attendance exported");
        Ok(ExportFile {
            filename: export_filename(exam_id),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(12), "attendance_12.xlsx");
    }
}
