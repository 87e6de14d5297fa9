//! Auth routes — registration, login, account profile, bearer extractors.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::request::Parts;
use axum::response::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::auth::{self as auth_svc, HardwareExperience, NewUser, SoftwareExperience, TokenResponse, UserProfile};
use crate::services::session;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

fn bearer_user(parts: &Parts, app_state: &AppState) -> Option<Uuid> {
    let header = parts.headers.typed_get::<Authorization<Bearer>>()?;
    session::validate_token(&app_state.auth, header.token())
}

/// Caller identified by a valid bearer token. Rejects with 401 otherwise.
pub struct AuthUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        bearer_user(parts, &app_state)
            .map(|user_id| Self { user_id })
            .ok_or_else(ApiError::credentials)
    }
}

/// Caller if a valid bearer token is present. Missing or invalid tokens are
/// treated as anonymous rather than rejected.
pub struct MaybeAuthUser(pub Option<Uuid>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Self(bearer_user(parts, &app_state)))
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub name: String,
    pub software_experience: Option<SoftwareExperience>,
    pub hardware_experience: Option<HardwareExperience>,
}

/// `POST /api/auth/register` — create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<UserProfile>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }
    let new_user = NewUser {
        email: body.email.trim(),
        name: &body.name,
        password: &body.password,
        software_experience: body.software_experience.map(SoftwareExperience::as_str),
        hardware_experience: body.hardware_experience.map(HardwareExperience::as_str),
    };
    let profile = auth_svc::register_user(&state.pool, &new_user).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login` — exchange credentials for a bearer token.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Result<Json<TokenResponse>, ApiError> {
    let token = auth_svc::login(&state.pool, &state.auth, body.email.trim(), &body.password).await?;
    Ok(Json(token))
}

/// `GET /api/auth/profile` — the caller's account.
pub async fn profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserProfile>, ApiError> {
    auth_svc::get_user(&state.pool, auth.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

#[derive(Deserialize)]
pub struct ProfileUpdateBody {
    pub software_experience: Option<SoftwareExperience>,
    pub hardware_experience: Option<HardwareExperience>,
}

/// `PUT /api/auth/profile` — change experience levels.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ProfileUpdateBody>,
) -> Result<Json<UserProfile>, ApiError> {
    auth_svc::update_experience(&state.pool, auth.user_id, body.software_experience, body.hardware_experience)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
