use chrono::NaiveDateTime;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{attendance, student};
use anyhow::Result;

pub struct AttendanceRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Option<attendance::Model>> {
        let record = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id))
            .one(self.db)
            .await?;
        Ok(record)
    }

    pub async fn find_by_students(&self, student_ids: &[i32]) -> Result<Vec<attendance::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = attendance::Entity::find()
            .filter(attendance::Column::StudentId.is_in(student_ids.iter().copied()))
            .all(self.db)
            .await?;
        Ok(records)
    }

    /// Creates the student's attendance row stamped `now`, or overwrites only
    /// `status` on the existing row. The timestamp is never refreshed.
    /// Runs as one statement so concurrent first submissions cannot collide
    /// on the student's unique row.
    pub async fn upsert(
        &self,
        student_id: i32,
        status: AttendanceStatus,
        now: NaiveDateTime,
    ) -> Result<()> {
        let record = attendance::ActiveModel {
            student_id: Set(student_id),
            status: Set(status),
            timestamp: Set(now),
            ..Default::default()
        };

        attendance::Entity::insert(record)
            .on_conflict(
                OnConflict::column(attendance::Column::StudentId)
                    .update_column(attendance::Column::Status)
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    /// Attendance rows joined with their student, ordered by registration
    /// number, optionally restricted to one exam and one page.
    pub async fn find_with_students(
        &self,
        exam_id: Option<i32>,
        page: Option<(u64, u64)>,
    ) -> Result<Vec<(attendance::Model, student::Model)>> {
        let mut query = attendance::Entity::find().find_also_related(student::Entity);

        if let Some(exam_id) = exam_id {
            query = query.filter(student::Column::ExamId.eq(exam_id));
        }

        query = query.order_by_asc(student::Column::RegNo);

        if let Some((page, page_size)) = page {
            query = query
                .limit(page_size)
                .offset(page.saturating_sub(1).saturating_mul(page_size));
        }

        let rows = query
            .all(self.db)
            .await?
            .into_iter()
            .filter_map(|(record, student)| student.map(|s| (record, s)))
            .collect();
        Ok(rows)
    }

    pub async fn count_for_exam(&self, exam_id: Option<i32>) -> Result<u64> {
        let mut query = attendance::Entity::find().inner_join(student::Entity);
        if let Some(exam_id) = exam_id {
            query = query.filter(student::Column::ExamId.eq(exam_id));
        }
        let total = query.count(self.db).await?;
        Ok(total)
    }

    /// Students of `exam_id` whose attendance is `Absent`, by registration number.
    pub async fn find_absentees(&self, exam_id: i32) -> Result<Vec<student::Model>> {
        let rows = attendance::Entity::find()
            .find_also_related(student::Entity)
            .filter(student::Column::ExamId.eq(exam_id))
            .filter(attendance::Column::Status.eq(AttendanceStatus::Absent))
            .order_by_asc(student::Column::RegNo)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, student)| student).collect())
    }
}
