use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::OperatorRole;
use crate::services::access::Principal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Operator id, as a string
    pub sub: String,
    pub username: String,
    pub role: OperatorRole,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn principal(&self) -> Option<Principal> {
        let operator_id = self.sub.parse().ok()?;
        Some(Principal {
            operator_id,
            username: self.username.clone(),
            role: self.role,
        })
    }
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs an HS256 token for the principal, valid for `expires_in` seconds.
    pub fn create_jwt(
        &self,
        principal: &Principal,
        expires_in: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: principal.operator_id.to_string(),
            username: principal.username.clone(),
            role: principal.role,
            iat: now,
            exp: now + expires_in,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invigilator() -> Principal {
        Principal {
            operator_id: 7,
            username: "ravi".to_string(),
            role: OperatorRole::Invigilator,
        }
    }

    #[test]
    fn test_token_decodes_to_same_principal() {
        let manager = JwtManager::new("test-secret");
        let token = manager.create_jwt(&invigilator(), 3600).unwrap();

        let claims = manager.decode_jwt(&token).unwrap();
        assert_eq!(claims.principal(), Some(invigilator()));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtManager::new("one")
            .create_jwt(&invigilator(), 3600)
            .unwrap();
        assert!(JwtManager::new("two").decode_jwt(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        // Past the default 60s leeway
        let token = manager.create_jwt(&invigilator(), -300).unwrap();
        assert!(manager.decode_jwt(&token).is_err());
    }
}
