use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims carried by a bearer token issued for a festival account.
/// Only `sub` matters for authorization; name/email ride along so
/// tooling can mint tokens that look like the identity provider's.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            sub: user_id.into(),
            name: None,
            email: None,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    /// Any verification failure: bad signature, expired, malformed.
    /// Callers surface all of these identically; the detail exists for
    /// server-side logging only.
    InvalidToken(String),
    MissingSecret,
    TokenGeneration(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidToken(msg) => write!(f, "invalid token: {}", msg),
            AuthError::MissingSecret => write!(f, "JWT secret not configured"),
            AuthError::TokenGeneration(msg) => write!(f, "token generation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Identity provider boundary: turn an opaque bearer token into a
/// stable user identifier, or fail. Implementations must not leak why
/// verification failed beyond the error's internal message.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<String, AuthError>;
}

/// JWT-backed verifier. The secret is injected at construction so the
/// verifier never reads global configuration per request.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(data.claims.sub)
    }
}

/// Mint a token for the given user, expiring after the configured
/// `jwt_expiry_hours`. The service never issues tokens to clients;
/// this exists for operational tooling and tests.
pub fn issue_token(user_id: &str, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = Claims::new(user_id);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}
