//! Account authentication: Argon2id password hashes, HS256 access tokens and
//! the [`AuthUser`] extractor.
//!
//! Tokens carry the account email as `sub`. Handlers accept them either as
//! `?token=` (what the frontend sends) or as an `Authorization: Bearer`
//! header.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use vastra_core::AuthConfig;
use vastra_store::User;

// ---------------------------------------------------------------
// Passwords
// ---------------------------------------------------------------

/// Hash a plaintext password as a PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `false` for a wrong password and for a hash that does not parse.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

// ---------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

pub fn create_access_token(email: &str, config: &AuthConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: email.to_string(),
        exp: now + config.access_token_expire_minutes * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
}

/// The email a valid, unexpired token was issued for.
pub fn verify_token(token: &str, config: &AuthConfig) -> Option<String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()
    .map(|data| data.claims.sub)
    .filter(|sub| !sub.is_empty())
}

// ---------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------

/// The email of the caller, taken from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = token_from_query(parts)
            .or_else(|| bearer_token(parts))
            .ok_or_else(|| {
                AppError::Unauthorized("Authentication required. Provide token as query parameter.".into())
            })?;

        let email = verify_token(&token, &state.config.auth)
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser { email })
    }
}

fn token_from_query(parts: &Parts) -> Option<String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).ok()?;
    params.get("token").filter(|t| !t.is_empty()).cloned()
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret".into(),
            access_token_expire_minutes: 60,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret-pass", "not-a-hash"));
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_access_token("asha@example.com", &config()).unwrap();
        assert_eq!(verify_token(&token, &config()).as_deref(), Some("asha@example.com"));
    }

    #[test]
    fn test_token_rejects_wrong_secret_and_expiry() {
        let token = create_access_token("asha@example.com", &config()).unwrap();
        let other = AuthConfig {
            secret_key: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_none());

        let expired = AuthConfig {
            access_token_expire_minutes: -10,
            ..config()
        };
        let token = create_access_token("asha@example.com", &expired).unwrap();
        assert!(verify_token(&token, &config()).is_none());
        assert!(verify_token("garbage", &config()).is_none());
    }

    #[test]
    fn test_register_validation() {
        let bad = RegisterRequest {
            name: "Asha".into(),
            email: "not-an-email".into(),
            password: "pw".into(),
        };
        assert!(bad.validate().is_err());

        let good = RegisterRequest {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "pw".into(),
        };
        assert!(good.validate().is_ok());
    }
}
