//! Personalization routes — learner profile, tailored content, suggestions.

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::routes::content::parse_content_id;
use crate::services::auth as auth_svc;
use crate::services::personalization::{
    self as personalization_svc, ContentPersonalization, PersonalizationProfile, ProfileUpdate, Recommendation,
};
use crate::state::AppState;

const PROFILE_NOT_FOUND: &str = "Profile not found";

/// `POST /api/personalization/profiles` — create or merge.
pub async fn upsert_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ProfileUpdate>,
) -> Json<PersonalizationProfile> {
    Json(personalization_svc::upsert_profile(&state, auth.user_id, body).await)
}

/// `GET /api/personalization/profiles`.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<PersonalizationProfile>, ApiError> {
    personalization_svc::get_profile(&state, auth.user_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PROFILE_NOT_FOUND))
}

/// `PUT /api/personalization/profiles` — existing profiles only.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<PersonalizationProfile>, ApiError> {
    personalization_svc::update_profile(&state, auth.user_id, body)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PROFILE_NOT_FOUND))
}

/// `GET /api/personalization/content/{content_id}/personalized`.
///
/// Tailored to the experience levels stored on the caller's account.
pub async fn personalized_content(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<ContentPersonalization>, ApiError> {
    let not_found = || ApiError::not_found("Personalized content not found");
    let content_id = parse_content_id(&raw_id).map_err(|_| not_found())?;
    let account = auth_svc::get_user(&state.pool, auth.user_id).await?;
    let experience = account
        .as_ref()
        .map_or((None, None), |u| (u.software_experience.as_deref(), u.hardware_experience.as_deref()));
    personalization_svc::personalized_content(&state, auth.user_id, content_id, experience)
        .await
        .map(Json)
        .ok_or_else(not_found)
}

/// `GET /api/personalization/recommendations`.
pub async fn recommendations(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<Recommendation>> {
    Json(personalization_svc::recommendations(&state, auth.user_id).await)
}

/// `GET /api/personalization/learning-path` — ordered content ids.
pub async fn learning_path(_auth: AuthUser) -> Json<Vec<String>> {
    Json(personalization_svc::learning_path())
}

#[cfg(test)]
#[path = "personalization_test.rs"]
mod tests;
