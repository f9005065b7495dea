use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::operator;
use crate::entities::sea_orm_active_enums::OperatorRole;
use anyhow::Result;

pub struct OperatorRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OperatorRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, operator_id: i32) -> Result<Option<operator::Model>> {
        let record = operator::Entity::find_by_id(operator_id).one(self.db).await?;
        Ok(record)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<operator::Model>> {
        let record = operator::Entity::find()
            .filter(operator::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(record)
    }

    /// `password_hash` must already be a bcrypt hash.
    pub async fn create(
        &self,
        username: String,
        password_hash: String,
        role: OperatorRole,
    ) -> Result<operator::Model> {
        let record = operator::ActiveModel {
            username: Set(username),
            password: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = record.insert(self.db).await?;
        Ok(result)
    }
}
