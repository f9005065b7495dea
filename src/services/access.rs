//! Role and capability checks applied at the start of every operation.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::OperatorRole;
use crate::error::ServiceError;
use crate::repositories::InvigilatorRepository;

/// The authenticated operator behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub operator_id: i32,
    pub username: String,
    pub role: OperatorRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == OperatorRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// View or submit the roster of one hall.
    TakeAttendance { hall_id: i32 },
    ViewAssignedHalls,
    ReviewAttendance,
    ImportRoster,
    ManageReferenceData,
}

/// Admins hold every capability. Invigilators may list their own halls and
/// take attendance only in halls assigned to them.
pub async fn authorize<C: ConnectionTrait>(
    db: &C,
    principal: &Principal,
    capability: Capability,
) -> Result<(), ServiceError> {
    match (principal.role, capability) {
        (OperatorRole::Admin, _) => Ok(()),
        (OperatorRole::Invigilator, Capability::ViewAssignedHalls) => Ok(()),
        (OperatorRole::Invigilator, Capability::TakeAttendance { hall_id }) => {
            let assigned = InvigilatorRepository::new(db)
                .is_assigned(principal.operator_id, hall_id)
                .await?;
            if assigned {
                Ok(())
            } else {
                tracing::warn!(
                    operator_id = principal.operator_id,
                    hall_id,
                    "invigilator refused for unassigned hall"
                );
                Err(ServiceError::AuthorizationFailure)
            }
        }
        (OperatorRole::Invigilator, _) => Err(ServiceError::AuthorizationFailure),
    }
}
