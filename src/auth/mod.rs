//! Token-based authentication module.
//!
//! Access tokens are HS256 JWTs. Password and token secrets are compared in constant
//! time to mitigate timing attacks.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::models::User;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// "client" or "supplier"
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    /// Unique token id
    pub jti: String,
}

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    /// `None` when the configured hours do not fit a duration
    ttl: Option<Duration>,
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl: Duration::try_hours(ttl_hours),
        }
    }

    /// Create a signed token for a user.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = self
            .ttl
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::Internal("Token lifetime is out of range".to_string()))?;

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.user_type.as_str().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature, issuer and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

/// Salted SHA-256 password digest, hex encoded.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a password against a stored salt and digest.
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    constant_time_compare(&hash_password(salt, password), expected_hash)
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Authentication layer: verifies the bearer token and stores its claims in the
/// request extensions for downstream handlers.
pub async fn bearer_auth_layer(jwt: JwtService, mut request: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&request) else {
        return AppError::Unauthorized("No valid authorization token provided".to_string())
            .into_response();
    };

    match jwt.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    fn user() -> User {
        User {
            id: "1".to_string(),
            email: "client@demo.com".to_string(),
            name: "John Client".to_string(),
            user_type: UserType::Client,
            avatar: None,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let jwt = JwtService::new("test-secret", "vendorlink-test", 24);
        let token = jwt.issue(&user()).unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "client@demo.com");
        assert_eq!(claims.role, "client");
        assert_eq!(claims.iss, "vendorlink-test");

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 24 * 3600);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = JwtService::new("secret-one", "vendorlink", 24);
        let verifier = JwtService::new("secret-two", "vendorlink", 24);
        let token = issuer.issue(&user()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_token_from_other_issuer_rejected() {
        let issuer = JwtService::new("secret", "someone-else", 24);
        let verifier = JwtService::new("secret", "vendorlink", 24);
        let token = issuer.issue(&user()).unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_out_of_range_lifetime_fails_without_panicking() {
        let jwt = JwtService::new("secret", "vendorlink", i64::MAX);
        assert!(matches!(jwt.issue(&user()), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_legacy_demo_token_rejected() {
        let jwt = JwtService::new("secret", "vendorlink", 24);
        assert!(jwt.verify("demo-token-1").is_err());
    }

    #[test]
    fn test_password_verification() {
        let hash = hash_password("salt-1", "demo123");
        assert_eq!(hash.len(), 64);
        assert!(verify_password("salt-1", "demo123", &hash));
        assert!(!verify_password("salt-1", "demo124", &hash));
        assert!(!verify_password("salt-2", "demo123", &hash));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(constant_time_compare("", ""));
    }
}
