use axum::{RequestPartsExt, extract::FromRequestParts, http::StatusCode, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::config::APP_CONFIG;
use crate::services::Principal;
use crate::utils::jwt::JwtManager;

/// Principal decoded from the `Authorization: Bearer` header.
pub struct AuthClaims(pub Principal);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Missing bearer token".to_string(),
                )
            })?;

        let claims = JwtManager::new(APP_CONFIG.jwt_secret.clone())
            .decode_jwt(bearer.token())
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            })?;

        let principal = claims
            .principal()
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Invalid token".to_string()))?;

        Ok(AuthClaims(principal))
    }
}
