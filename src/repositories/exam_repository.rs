use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::exam;
use crate::entities::sea_orm_active_enums::ExamSession;
use anyhow::Result;

pub struct ExamRepository<'a, C> {
    db: &'a C,
}

pub struct NewExam {
    pub subject: String,
    pub date: NaiveDate,
    pub session: ExamSession,
    pub start_time: Option<NaiveTime>,
}

impl<'a, C: ConnectionTrait> ExamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<exam::Model>> {
        let exams = exam::Entity::find()
            .order_by_asc(exam::Column::Date)
            .order_by_asc(exam::Column::Session)
            .order_by_asc(exam::Column::ExamId)
            .all(self.db)
            .await?;
        Ok(exams)
    }

    pub async fn find_by_id(&self, exam_id: i32) -> Result<Option<exam::Model>> {
        let exam = exam::Entity::find_by_id(exam_id).one(self.db).await?;
        Ok(exam)
    }

    pub async fn find_by_ids(&self, exam_ids: &[i32]) -> Result<Vec<exam::Model>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }
        let exams = exam::Entity::find()
            .filter(exam::Column::ExamId.is_in(exam_ids.iter().copied()))
            .all(self.db)
            .await?;
        Ok(exams)
    }

    pub async fn create(&self, new_exam: NewExam) -> Result<exam::Model> {
        let exam_model = exam::ActiveModel {
            subject: Set(new_exam.subject),
            date: Set(new_exam.date),
            session: Set(new_exam.session),
            start_time: Set(new_exam.start_time),
            ..Default::default()
        };

        let result = exam_model.insert(self.db).await?;
        Ok(result)
    }
}
