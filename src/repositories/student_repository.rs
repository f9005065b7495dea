use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::student;
use anyhow::Result;

pub struct StudentRepository<'a, C> {
    db: &'a C,
}

/// Everything a roster upsert overwrites on an existing student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub year_id: i32,
    pub branch_id: i32,
    pub section_id: i32,
    pub hall_id: i32,
    pub exam_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentUpsert {
    Created,
    Updated,
}

#[derive(Debug, Default, Clone)]
pub struct StudentFilter {
    pub exam_id: Option<i32>,
    pub hall_id: Option<i32>,
    pub section_id: Option<i32>,
    pub search: Option<String>,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_reg_no(&self, reg_no: &str) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::RegNo.eq(reg_no))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_hall(&self, hall_id: i32) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::HallId.eq(hall_id))
            .order_by_asc(student::Column::RegNo)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_filtered(&self, filter: StudentFilter) -> Result<Vec<student::Model>> {
        let mut query = student::Entity::find();

        if let Some(exam_id) = filter.exam_id {
            query = query.filter(student::Column::ExamId.eq(exam_id));
        }
        if let Some(hall_id) = filter.hall_id {
            query = query.filter(student::Column::HallId.eq(hall_id));
        }
        if let Some(section_id) = filter.section_id {
            query = query.filter(student::Column::SectionId.eq(section_id));
        }

        // Search by registration number or name
        if let Some(search_term) = filter.search.filter(|s| !s.trim().is_empty()) {
            let search_term = search_term.trim();
            query = query.filter(
                Condition::any()
                    .add(student::Column::RegNo.contains(search_term))
                    .add(student::Column::Name.contains(search_term)),
            );
        }

        let students = query
            .order_by_asc(student::Column::RegNo)
            .all(self.db)
            .await?;
        Ok(students)
    }

    /// Creates the student if `reg_no` is unknown, otherwise overwrites every
    /// field in [`StudentFields`].
    /// Inserts the student or overwrites every roster field on the row with
    /// the same `reg_no`, as one statement. The outcome reflects what was
    /// visible before the write.
    pub async fn upsert(
        &self,
        reg_no: &str,
        fields: StudentFields,
    ) -> Result<(student::Model, StudentUpsert)> {
        let outcome = match self.find_by_reg_no(reg_no).await? {
            Some(_) => StudentUpsert::Updated,
            None => StudentUpsert::Created,
        };

        let student_model = student::ActiveModel {
            reg_no: Set(reg_no.to_string()),
            name: Set(fields.name),
            year_id: Set(fields.year_id),
            branch_id: Set(fields.branch_id),
            section_id: Set(fields.section_id),
            hall_id: Set(fields.hall_id),
            exam_id: Set(fields.exam_id),
            ..Default::default()
        };

        student::Entity::insert(student_model)
            .on_conflict(
                OnConflict::column(student::Column::RegNo)
                    .update_columns([
                        student::Column::Name,
                        student::Column::YearId,
                        student::Column::BranchId,
                        student::Column::SectionId,
                        student::Column::HallId,
                        student::Column::ExamId,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let stored = self
            .find_by_reg_no(reg_no)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student '{}' missing after upsert", reg_no))?;
        Ok((stored, outcome))
    }
}
