use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::{APP_CONFIG, JWT_EXPRIED_TIME};
use crate::error::to_http_error;
use crate::routes::{HttpError, db};
use crate::services::operators::{LoginPortal, OperatorService};
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/auth/invigilator/login", post(invigilator_login))
        .route("/api/v1/auth/admin/login", post(admin_login))
}

async fn login(portal: LoginPortal, payload: LoginRequest) -> Result<LoginResponse, HttpError> {
    let db = db().await?;
    let principal = OperatorService::new(db)
        .authenticate(portal, &payload.username, &payload.password)
        .await
        .map_err(to_http_error)?;

    let token = JwtManager::new(APP_CONFIG.jwt_secret.clone())
        .create_jwt(&principal, JWT_EXPRIED_TIME)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create token: {}", e),
            )
        })?;

    Ok(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: JWT_EXPRIED_TIME,
        operator_id: principal.operator_id,
        username: principal.username,
        role: principal.role,
    })
}

/// Invigilator login, returns a JWT
#[utoipa::path(
    post,
    path = "/api/v1/auth/invigilator/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn invigilator_login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), HttpError> {
    let response = login(LoginPortal::Invigilator, payload).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Admin login, returns a JWT
#[utoipa::path(
    post,
    path = "/api/v1/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn admin_login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), HttpError> {
    let response = login(LoginPortal::Admin, payload).await?;
    Ok((StatusCode::OK, Json(response)))
}
