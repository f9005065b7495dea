use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::year;
use anyhow::Result;

pub struct YearRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> YearRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<year::Model>> {
        let years = year::Entity::find()
            .order_by_asc(year::Column::YearId)
            .all(self.db)
            .await?;
        Ok(years)
    }

    pub async fn find_by_id(&self, year_id: i32) -> Result<Option<year::Model>> {
        let year = year::Entity::find_by_id(year_id).one(self.db).await?;
        Ok(year)
    }

    pub async fn create(&self, year_name: String) -> Result<year::Model> {
        let year_model = year::ActiveModel {
            year_name: Set(year_name),
            ..Default::default()
        };

        let result = year_model.insert(self.db).await?;
        Ok(result)
    }
}
