use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::section;
use anyhow::Result;

pub struct SectionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SectionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<section::Model>> {
        let sections = section::Entity::find()
            .order_by_asc(section::Column::SectionId)
            .all(self.db)
            .await?;
        Ok(sections)
    }

    pub async fn create(
        &self,
        section_name: String,
        year_id: i32,
        branch_id: i32,
    ) -> Result<section::Model> {
        let section_model = section::ActiveModel {
            section_name: Set(section_name),
            year_id: Set(year_id),
            branch_id: Set(branch_id),
            ..Default::default()
        };

        let result = section_model.insert(self.db).await?;
        Ok(result)
    }
}
