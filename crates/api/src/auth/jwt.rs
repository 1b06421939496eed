//! Bearer tokens for the issue API.
//!
//! Tokens are HS256 JWTs minted by the identity service that shares
//! `JWT_SECRET` with this server. Only the user id and role name travel in
//! the token; capabilities are derived from the role on every request.

use chrono::{Duration, Utc};
use issuetrack_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_TTL_MINS: i64 = 15;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Acting user id.
    pub sub: DbId,
    /// Role name from `issuetrack_core::permissions`.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Per-token id, so individual tokens can be told apart in logs.
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl_mins` from now.
    pub fn new(user_id: DbId, role: &str, ttl_mins: i64) -> Self {
        let issued = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: (issued + Duration::minutes(ttl_mins)).timestamp(),
            iat: issued.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or an expiry that is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be an integer"),
            Err(_) => DEFAULT_TTL_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn validation() -> Validation {
        Validation::new(Algorithm::HS256)
    }
}

/// Sign a token for `user_id` acting with `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, role, config.access_token_expiry_mins);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check the signature and expiry of `token` and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}
