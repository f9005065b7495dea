use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{invigilator, invigilator_hall};
use anyhow::Result;

pub struct InvigilatorRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvigilatorRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, invigilator_id: i32) -> Result<Option<invigilator::Model>> {
        let record = invigilator::Entity::find_by_id(invigilator_id)
            .one(self.db)
            .await?;
        Ok(record)
    }

    pub async fn find_by_operator_id(
        &self,
        operator_id: i32,
    ) -> Result<Option<invigilator::Model>> {
        let record = invigilator::Entity::find()
            .filter(invigilator::Column::OperatorId.eq(operator_id))
            .one(self.db)
            .await?;
        Ok(record)
    }

    pub async fn create(&self, operator_id: i32) -> Result<invigilator::Model> {
        let record = invigilator::ActiveModel {
            operator_id: Set(operator_id),
            ..Default::default()
        };

        let result = record.insert(self.db).await?;
        Ok(result)
    }

    pub async fn hall_ids(&self, invigilator_id: i32) -> Result<Vec<i32>> {
        let hall_ids = invigilator_hall::Entity::find()
            .filter(invigilator_hall::Column::InvigilatorId.eq(invigilator_id))
            .select_only()
            .column(invigilator_hall::Column::HallId)
            .order_by_asc(invigilator_hall::Column::HallId)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;
        Ok(hall_ids)
    }

    /// Whether the operator is an invigilator assigned to `hall_id`.
    pub async fn is_assigned(&self, operator_id: i32, hall_id: i32) -> Result<bool> {
        let Some(record) = self.find_by_operator_id(operator_id).await? else {
            return Ok(false);
        };

        let count = invigilator_hall::Entity::find()
            .filter(invigilator_hall::Column::InvigilatorId.eq(record.invigilator_id))
            .filter(invigilator_hall::Column::HallId.eq(hall_id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Replaces the invigilator's hall set.
    pub async fn replace_halls(&self, invigilator_id: i32, hall_ids: &[i32]) -> Result<()> {
        invigilator_hall::Entity::delete_many()
            .filter(invigilator_hall::Column::InvigilatorId.eq(invigilator_id))
            .exec(self.db)
            .await?;

        let mut unique_ids = hall_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        if unique_ids.is_empty() {
            return Ok(());
        }

        let rows = unique_ids.into_iter().map(|hall_id| invigilator_hall::ActiveModel {
            invigilator_id: Set(invigilator_id),
            hall_id: Set(hall_id),
        });
        invigilator_hall::Entity::insert_many(rows)
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }
}
