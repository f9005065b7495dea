use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

use crate::error::{ServiceError, to_http_error};
use crate::static_service::get_database_connection;

pub mod attendance;
pub mod auth;
pub mod health;
pub mod invigilators;
pub mod reference;
pub mod reports;
pub mod students;

pub type HttpError = (StatusCode, String);

/// Shared pool for handlers.
pub async fn db() -> Result<&'static DatabaseConnection, HttpError> {
    get_database_connection().await.map_err(|e| {
        to_http_error(ServiceError::Internal(e.context("Database unavailable")))
    })
}
