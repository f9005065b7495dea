use std::fmt;

use http::StatusCode;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Reference tables an import row is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Year,
    Branch,
    Section,
    Hall,
    Exam,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Year => "Year",
            ReferenceKind::Branch => "Branch",
            ReferenceKind::Section => "Section",
            ReferenceKind::Hall => "Hall",
            ReferenceKind::Exam => "Exam",
        };
        f.write_str(name)
    }
}

/// A textual reference that matched zero or several reference rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    pub kind: ReferenceKind,
    pub key: String,
    pub matches: usize,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches == 0 {
            write!(f, "{} '{}' does not exist", self.kind, self.key)
        } else {
            write!(
                f,
                "{} '{}' is ambiguous ({} matches)",
                self.kind, self.key, self.matches
            )
        }
    }
}

/// One rejected roster row. `row` is the 1-based spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row: usize,
    pub reg_no: String,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid credentials")]
    AuthenticationFailure,

    #[error("Forbidden")]
    AuthorizationFailure,

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("Roster import rejected: {} row(s) failed", .0.len())]
    ImportRejected(Vec<RowError>),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            ServiceError::AuthorizationFailure => StatusCode::FORBIDDEN,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Lookup(_) | ServiceError::ImportRejected(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Spreadsheet(_)
            | ServiceError::Database(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts a service error into the `(StatusCode, String)` pair the handlers
/// return. Internal failures are logged here and reported generically.
pub fn to_http_error(err: ServiceError) -> (StatusCode, String) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
        return (status, "Internal server error".to_string());
    }
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        let missing = LookupError {
            kind: ReferenceKind::Branch,
            key: "MECH".to_string(),
            matches: 0,
        };
        assert_eq!(missing.to_string(), "Branch 'MECH' does not exist");

        let ambiguous = LookupError {
            kind: ReferenceKind::Year,
            key: "II".to_string(),
            matches: 2,
        };
        assert_eq!(ambiguous.to_string(), "Year 'II' is ambiguous (2 matches)");
    }

    #[test]
    fn test_authorization_failure_leaks_no_detail() {
        let (status, body) = to_http_error(ServiceError::AuthorizationFailure);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Forbidden");
    }

    #[test]
    fn test_database_errors_are_reported_generically() {
        let (status, body) =
            to_http_error(ServiceError::Database(DbErr::Custom("disk on fire".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal server error");
    }
}
