use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{exam, hall};
use crate::error::ServiceError;
use crate::repositories::{
    AttendanceRepository, ExamRepository, HallRepository, InvigilatorRepository,
    StudentRepository,
};
use crate::services::access::{Capability, Principal, authorize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub student_id: i32,
    pub reg_no: String,
    pub name: String,
    pub subject: String,
    pub status: AttendanceStatus,
    /// Whether an attendance row exists yet. `status` defaults to Present when not.
    pub recorded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HallRoster {
    pub hall_id: i32,
    pub hall_no: String,
    pub exam_id: i32,
    pub exam: String,
    pub students: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub hall_id: i32,
    pub recorded: usize,
    pub present: usize,
    pub absent: usize,
    /// Submitted registration numbers with no student in the hall.
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedHall {
    pub hall_id: i32,
    pub hall_no: String,
    pub exam_id: i32,
    pub exam: String,
}

pub struct AttendanceRecorder<'a> {
    db: &'a DatabaseConnection,
}

async fn find_hall<C: ConnectionTrait>(
    db: &C,
    hall_id: i32,
) -> Result<(hall::Model, exam::Model), ServiceError> {
    let hall = HallRepository::new(db)
        .find_by_id(hall_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Hall", hall_id))?;
    let exam = ExamRepository::new(db)
        .find_by_id(hall.exam_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Exam", hall.exam_id))?;
    Ok((hall, exam))
}

impl<'a> AttendanceRecorder<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Students seated in the hall, by registration number, with their
    /// current status.
    pub async fn roster(
        &self,
        principal: &Principal,
        hall_id: i32,
    ) -> Result<HallRoster, ServiceError> {
        let (hall, exam) = find_hall(self.db, hall_id).await?;
        authorize(self.db, principal, Capability::TakeAttendance { hall_id }).await?;

        let students = StudentRepository::new(self.db).find_by_hall(hall_id).await?;
        let student_ids: Vec<i32> = students.iter().map(|s| s.student_id).collect();
        let statuses: HashMap<i32, AttendanceStatus> = AttendanceRepository::new(self.db)
            .find_by_students(&student_ids)
            .await?
            .into_iter()
            .map(|record| (record.student_id, record.status))
            .collect();

        // Subject comes from each student's own exam
        let mut exam_ids: Vec<i32> = students.iter().map(|s| s.exam_id).collect();
        exam_ids.sort_unstable();
        exam_ids.dedup();
        let subjects: HashMap<i32, String> = ExamRepository::new(self.db)
            .find_by_ids(&exam_ids)
            .await?
            .into_iter()
            .map(|e| (e.exam_id, e.subject))
            .collect();

        let entries = students
            .into_iter()
            .map(|s| {
                let recorded = statuses.get(&s.student_id).copied();
                RosterEntry {
                    student_id: s.student_id,
                    subject: subjects.get(&s.exam_id).cloned().unwrap_or_default(),
                    reg_no: s.reg_no,
                    name: s.name,
                    status: recorded.unwrap_or_default(),
                    recorded: recorded.is_some(),
                }
            })
            .collect();

        Ok(HallRoster {
            hall_id: hall.hall_id,
            hall_no: hall.hall_no,
            exam_id: exam.exam_id,
            exam: exam.label(),
            students: entries,
        })
    }

    pub async fn submit(
        &self,
        principal: &Principal,
        hall_id: i32,
        submitted: &HashMap<String, AttendanceStatus>,
    ) -> Result<SubmissionSummary, ServiceError> {
        self.submit_at(principal, hall_id, submitted, Utc::now().naive_utc())
            .await
    }

    /// Records attendance for every student in the hall. Students missing from
    /// `submitted` are recorded Present.
    pub async fn submit_at(
        &self,
        principal: &Principal,
        hall_id: i32,
        submitted: &HashMap<String, AttendanceStatus>,
        now: NaiveDateTime,
    ) -> Result<SubmissionSummary, ServiceError> {
        find_hall(self.db, hall_id).await?;
        authorize(self.db, principal, Capability::TakeAttendance { hall_id }).await?;

        let mut statuses: HashMap<&str, AttendanceStatus> =
            HashMap::with_capacity(submitted.len());
        for (reg_no, status) in submitted {
            let key = reg_no.trim();
            if statuses.insert(key, *status).is_some() {
                return Err(ServiceError::MalformedInput(format!(
                    "Registration number '{}' is submitted more than once",
                    key
                )));
            }
        }

        let mut summary = SubmissionSummary {
            hall_id,
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let seated: HashSet<String> = {
            let students = StudentRepository::new(&txn).find_by_hall(hall_id).await?;
            let attendance = AttendanceRepository::new(&txn);

            for student in &students {
                let status = statuses
                    .get(student.reg_no.trim())
                    .copied()
                    .unwrap_or_default();
                attendance.upsert(student.student_id, status, now).await?;

                summary.recorded += 1;
                match status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                }
            }

            students.into_iter().map(|s| s.reg_no.trim().to_string()).collect()
        };
        txn.commit().await?;

        summary.ignored = statuses
            .keys()
            .filter(|reg_no| !seated.contains(**reg_no))
            .map(|reg_no| reg_no.to_string())
            .collect();
        summary.ignored.sort();

        tracing::info!(
            hall_id,
            operator_id = principal.operator_id,
            recorded = summary.recorded,
            absent = summary.absent,
            ignored = summary.ignored.len(),
            "attendance submitted"
        );
        Ok(summary)
    }

    /// Halls assigned to the calling invigilator. Admins have no assignment
    /// and get an empty list.
    pub async fn assigned_halls(
        &self,
        principal: &Principal,
    ) -> Result<Vec<AssignedHall>, ServiceError> {
        authorize(self.db, principal, Capability::ViewAssignedHalls).await?;

        let invigilators = InvigilatorRepository::new(self.db);
        let Some(invigilator) = invigilators
            .find_by_operator_id(principal.operator_id)
            .await?
        else {
            return Ok(Vec::new());
        };

        let hall_ids = invigilators.hall_ids(invigilator.invigilator_id).await?;
        let halls = HallRepository::new(self.db).find_by_ids(&hall_ids).await?;

        let exam_ids: Vec<i32> = halls.iter().map(|h| h.exam_id).collect();
        let labels: HashMap<i32, String> = ExamRepository::new(self.db)
            .find_by_ids(&exam_ids)
            .await?
            .into_iter()
            .map(|e| (e.exam_id, e.label()))
            .collect();

        Ok(halls
            .into_iter()
            .map(|h| AssignedHall {
                exam: labels.get(&h.exam_id).cloned().unwrap_or_default(),
                hall_id: h.hall_id,
                hall_no: h.hall_no,
                exam_id: h.exam_id,
            })
            .collect())
    }
}
