// src/services/auth.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{common::error::AppError, models::auth::Claims};

// Emissão e verificação dos tokens assinados (HS256)
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(jwt_secret: String, token_ttl: Duration) -> Self {
        Self { jwt_secret, token_ttl }
    }

    pub fn issue_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            email: email.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret".to_string(), Duration::minutes(60))
    }

    #[test]
    fn issued_token_validates_back_to_the_same_email() {
        let auth = service();
        let token = auth.issue_token("hr@acme.io").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.email, "hr@acme.io");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = AuthService::new("other-secret".to_string(), Duration::minutes(60));
        let token = other.issue_token("hr@acme.io").unwrap();
        assert!(matches!(service().validate_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Bem além da tolerância padrão de 60s do jsonwebtoken
        let auth = AuthService::new("test-secret".to_string(), Duration::minutes(-10));
        let token = auth.issue_token("hr@acme.io").unwrap();
        assert!(matches!(auth.validate_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(service().validate_token("not-a-token"), Err(AppError::InvalidToken)));
    }
}
