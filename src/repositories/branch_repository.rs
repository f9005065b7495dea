use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::branch;
use anyhow::Result;

pub struct BranchRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BranchRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<branch::Model>> {
        let branches = branch::Entity::find()
            .order_by_asc(branch::Column::BranchId)
            .all(self.db)
            .await?;
        Ok(branches)
    }

    pub async fn find_by_id(&self, branch_id: i32) -> Result<Option<branch::Model>> {
        let branch = branch::Entity::find_by_id(branch_id).one(self.db).await?;
        Ok(branch)
    }

    pub async fn create(&self, branch_name: String) -> Result<branch::Model> {
        let branch_model = branch::ActiveModel {
            branch_name: Set(branch_name),
            ..Default::default()
        };

        let result = branch_model.insert(self.db).await?;
        Ok(result)
    }
}
