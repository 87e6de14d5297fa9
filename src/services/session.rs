//! Password hashing and bearer-token issue/validation.
//!
//! ARCHITECTURE
//! ============
//! Tokens are stateless signed JWTs (`sub` = user id, `exp` = expiry), so
//! validating one never touches the database. Passwords are stored as Argon2
//! PHC strings with a per-password random salt.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

// =============================================================================
// PASSWORDS
// =============================================================================

/// Hash a plaintext password into a PHC string.
///
/// # Errors
///
/// Returns [`SessionError::Hash`] if salt encoding or hashing fails.
pub fn hash_password(password: &str) -> Result<String, SessionError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| SessionError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SessionError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

// =============================================================================
// TOKENS
// =============================================================================

/// Sign an access token for `user_id` expiring after the configured lifetime.
///
/// # Errors
///
/// Returns [`SessionError::Encode`] if signing fails.
pub fn issue_token(config: &AuthConfig, user_id: Uuid) -> Result<IssuedToken, SessionError> {
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims { sub: user_id.to_string(), exp: expires_at.unix_timestamp() };
    let token = jsonwebtoken::encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )?;
    Ok(IssuedToken { token, expires_at })
}

/// Decode a token and return its subject. Bad signature, expiry, or a
/// non-UUID subject all yield `None`.
#[must_use]
pub fn validate_token(config: &AuthConfig, token: &str) -> Option<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::new(config.algorithm),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
