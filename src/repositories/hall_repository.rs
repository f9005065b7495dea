use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::hall;
use anyhow::Result;

pub struct HallRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HallRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<hall::Model>> {
        let halls = hall::Entity::find()
            .order_by_asc(hall::Column::HallId)
            .all(self.db)
            .await?;
        Ok(halls)
    }

    pub async fn find_by_id(&self, hall_id: i32) -> Result<Option<hall::Model>> {
        let hall = hall::Entity::find_by_id(hall_id).one(self.db).await?;
        Ok(hall)
    }

    pub async fn find_by_ids(&self, hall_ids: &[i32]) -> Result<Vec<hall::Model>> {
        if hall_ids.is_empty() {
            return Ok(Vec::new());
        }
        let halls = hall::Entity::find()
            .filter(hall::Column::HallId.is_in(hall_ids.iter().copied()))
            .order_by_asc(hall::Column::HallNo)
            .all(self.db)
            .await?;
        Ok(halls)
    }

    pub async fn create(&self, hall_no: String, exam_id: i32) -> Result<hall::Model> {
        let hall_model = hall::ActiveModel {
            hall_no: Set(hall_no),
            exam_id: Set(exam_id),
            ..Default::default()
        };

        let result = hall_model.insert(self.db).await?;
        Ok(result)
    }
}
