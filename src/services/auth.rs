//! Account service — registration, credential login, and profile updates.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::services::session::{self, SessionError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftwareExperience {
    Beginner,
    Intermediate,
    Advanced,
}

impl SoftwareExperience {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareExperience {
    None,
    Basic,
    Intermediate,
    Advanced,
}

impl HardwareExperience {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Public view of a user row (never includes the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub software_experience: Option<String>,
    pub hardware_experience: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
}

type UserTuple = (Uuid, String, String, Option<String>, Option<String>, OffsetDateTime, Option<OffsetDateTime>);

impl From<UserTuple> for UserProfile {
    fn from(row: UserTuple) -> Self {
        let (id, email, name, software_experience, hardware_experience, created_at, last_login) = row;
        Self { id, email, name, software_experience, hardware_experience, created_at, last_login }
    }
}

const USER_COLUMNS: &str = "id, email, name, software_experience, hardware_experience, created_at, last_login";

#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub software_experience: Option<&'a str>,
    pub hardware_experience: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Create an account. Emails are unique.
///
/// # Errors
///
/// Returns [`AuthError::EmailTaken`] on a duplicate email, or a hashing/database error.
pub async fn register_user(pool: &PgPool, new_user: &NewUser<'_>) -> Result<UserProfile, AuthError> {
    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(new_user.email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let hashed = session::hash_password(new_user.password)?;
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "INSERT INTO users (id, email, name, hashed_password, software_experience, hardware_experience)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new_user.email)
    .bind(new_user.name)
    .bind(hashed)
    .bind(new_user.software_experience)
    .bind(new_user.hardware_experience)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::EmailTaken,
        other => AuthError::Database(other),
    })?;

    let profile = UserProfile::from(row);
    info!(user_id = %profile.id, "user registered");
    Ok(profile)
}

/// Verify credentials, stamp `last_login`, and issue an access token.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for an unknown email or wrong password.
pub async fn login(pool: &PgPool, config: &AuthConfig, email: &str, password: &str) -> Result<TokenResponse, AuthError> {
    let row = sqlx::query_as::<_, (Uuid, String)>("SELECT id, hashed_password FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    let Some((user_id, hashed)) = row else {
        return Err(AuthError::InvalidCredentials);
    };
    if !session::verify_password(password, &hashed) {
        return Err(AuthError::InvalidCredentials);
    }

    sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    let issued = session::issue_token(config, user_id)?;
    info!(%user_id, "user logged in");
    Ok(TokenResponse { access_token: issued.token, token_type: "bearer", user_id, expires_at: issued.expires_at })
}

/// # Errors
///
/// Returns a database error if the query fails.
pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, AuthError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(UserProfile::from))
}

/// Overwrite whichever experience levels are provided. `None` if the user is gone.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn update_experience(
    pool: &PgPool,
    user_id: Uuid,
    software: Option<SoftwareExperience>,
    hardware: Option<HardwareExperience>,
) -> Result<Option<UserProfile>, AuthError> {
    let row = sqlx::query_as::<_, UserTuple>(&format!(
        "UPDATE users
         SET software_experience = COALESCE($2, software_experience),
             hardware_experience = COALESCE($3, hardware_experience)
         WHERE id = $1
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(software.map(SoftwareExperience::as_str))
    .bind(hardware.map(HardwareExperience::as_str))
    .fetch_optional(pool)
    .await?;
    Ok(row.map(UserProfile::from))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
