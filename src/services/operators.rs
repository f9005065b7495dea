//! Operator accounts: login verification, provisioning and hall assignment.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::operator;
use crate::entities::sea_orm_active_enums::OperatorRole;
use crate::error::ServiceError;
use crate::repositories::{HallRepository, InvigilatorRepository, OperatorRepository};
use crate::services::access::Principal;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Which login form the credentials were submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPortal {
    Invigilator,
    Admin,
}

#[derive(Debug, Clone)]
pub struct NewOperator {
    pub username: String,
    pub password: String,
    pub role: OperatorRole,
    /// Only used for invigilators.
    pub hall_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedOperator {
    pub operator_id: i32,
    pub username: String,
    pub role: OperatorRole,
    pub invigilator_id: Option<i32>,
    pub hall_ids: Vec<i32>,
}

pub struct OperatorService<'a> {
    db: &'a DatabaseConnection,
    hash_cost: u32,
}

async fn ensure_halls_exist<C: ConnectionTrait>(
    db: &C,
    hall_ids: &[i32],
) -> Result<Vec<i32>, ServiceError> {
    let mut unique_ids = hall_ids.to_vec();
    unique_ids.sort_unstable();
    unique_ids.dedup();

    let found: Vec<i32> = HallRepository::new(db)
        .find_by_ids(&unique_ids)
        .await?
        .into_iter()
        .map(|h| h.hall_id)
        .collect();

    if let Some(missing) = unique_ids.iter().find(|id| !found.contains(id)) {
        return Err(ServiceError::not_found("Hall", missing));
    }
    Ok(unique_ids)
}

impl<'a> OperatorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self::with_hash_cost(db, bcrypt::DEFAULT_COST)
    }

    pub fn with_hash_cost(db: &'a DatabaseConnection, hash_cost: u32) -> Self {
        Self { db, hash_cost }
    }

    /// Verifies credentials for the given portal. Every failure, including an
    /// unknown username or the wrong portal, is reported the same way.
    pub async fn authenticate(
        &self,
        portal: LoginPortal,
        username: &str,
        password: &str,
    ) -> Result<Principal, ServiceError> {
        let Some(record) = OperatorRepository::new(self.db)
            .find_by_username(username.trim())
            .await?
        else {
            tracing::info!(username, "login failed: unknown operator");
            return Err(ServiceError::AuthenticationFailure);
        };

        let password_valid = bcrypt::verify(password, &record.password)
            .map_err(|e| anyhow::anyhow!("Password verification error: {}", e))?;
        if !password_valid {
            tracing::info!(username, "login failed: wrong password");
            return Err(ServiceError::AuthenticationFailure);
        }

        let allowed = match portal {
            LoginPortal::Admin => record.role == OperatorRole::Admin,
            LoginPortal::Invigilator => InvigilatorRepository::new(self.db)
                .find_by_operator_id(record.operator_id)
                .await?
                .is_some(),
        };
        if !allowed {
            tracing::info!(username, ?portal, "login failed: wrong portal");
            return Err(ServiceError::AuthenticationFailure);
        }

        Ok(principal_of(&record))
    }

    pub async fn create_operator(
        &self,
        new_operator: NewOperator,
    ) -> Result<ProvisionedOperator, ServiceError> {
        let username = new_operator.username.trim().to_string();
        if username.is_empty() {
            return Err(ServiceError::MalformedInput(
                "username must not be empty".to_string(),
            ));
        }
        if new_operator.password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::MalformedInput(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = bcrypt::hash(&new_operator.password, self.hash_cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

        let txn = self.db.begin().await?;
        let provisioned = {
            let operators = OperatorRepository::new(&txn);
            if operators.find_by_username(&username).await?.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Operator '{}' already exists",
                    username
                )));
            }

            let record = operators
                .create(username, password_hash, new_operator.role)
                .await?;

            let (invigilator_id, hall_ids) = match new_operator.role {
                OperatorRole::Invigilator => {
                    let hall_ids = ensure_halls_exist(&txn, &new_operator.hall_ids).await?;
                    let invigilators = InvigilatorRepository::new(&txn);
                    let invigilator = invigilators.create(record.operator_id).await?;
                    invigilators
                        .replace_halls(invigilator.invigilator_id, &hall_ids)
                        .await?;
                    (Some(invigilator.invigilator_id), hall_ids)
                }
                OperatorRole::Admin => (None, Vec::new()),
            };

            ProvisionedOperator {
                operator_id: record.operator_id,
                username: record.username,
                role: record.role,
                invigilator_id,
                hall_ids,
            }
        };
        txn.commit().await?;

        tracing::info!(
            operator_id = provisioned.operator_id,
            username = %provisioned.username,
            role = %provisioned.role.as_str(),
            "operator created"
        );
        Ok(provisioned)
    }

    /// Replaces the invigilator's halls; returns the stored hall ids.
    pub async fn assign_halls(
        &self,
        invigilator_id: i32,
        hall_ids: &[i32],
    ) -> Result<Vec<i32>, ServiceError> {
        let txn = self.db.begin().await?;
        let stored = {
            let invigilators = InvigilatorRepository::new(&txn);
            invigilators
                .find_by_id(invigilator_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Invigilator", invigilator_id))?;

            let hall_ids = ensure_halls_exist(&txn, hall_ids).await?;
            invigilators.replace_halls(invigilator_id, &hall_ids).await?;
            hall_ids
        };
        txn.commit().await?;

        tracing::info!(invigilator_id, halls = ?stored, "invigilator halls replaced");
        Ok(stored)
    }

    /// Creates the admin unless an operator with that username already
    /// exists. Returns whether one was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        let existing = OperatorRepository::new(self.db)
            .find_by_username(username.trim())
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        self.create_operator(NewOperator {
            username: username.to_string(),
            password: password.to_string(),
            role: OperatorRole::Admin,
            hall_ids: Vec::new(),
        })
        .await?;
        Ok(true)
    }
}

pub fn principal_of(record: &operator::Model) -> Principal {
    Principal {
        operator_id: record.operator_id,
        username: record.username.clone(),
        role: record.role,
    }
}
