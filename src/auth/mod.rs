pub mod access;

pub use access::{verify_access, ACCESS_DENIED_MESSAGE};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::types::RecordId;

/// Ten years
const MAX_EXPIRY_HOURS: i64 = 24 * 365 * 10;

/// Token claims. `sub` is the caller's user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: &RecordId) -> Self {
        Self::with_expiry(user_id, config::config().security.jwt_expiry_hours)
    }

    pub fn with_expiry(user_id: &RecordId, hours: u64) -> Self {
        let now = Utc::now();
        let hours = i64::try_from(hours)
            .unwrap_or(MAX_EXPIRY_HOURS)
            .min(MAX_EXPIRY_HOURS);
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: user_id.canonical(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("JWT secret not configured")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Validate a token's signature and expiry and return its claims
pub fn validate_jwt(token: &str) -> Result<Claims, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
