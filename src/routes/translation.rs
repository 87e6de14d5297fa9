//! Translation routes — background requests, language list, direct calls.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::services::translation::{
    self as translation_svc, DirectTranslation, NewTranslationRequest, SupportedLanguage, TranslationRequest,
};
use crate::state::AppState;

const NOT_FOUND: &str = "Translation request not found";

/// `POST /api/translation/requests` — returns immediately with `pending`.
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewTranslationRequest>,
) -> Json<TranslationRequest> {
    Json(translation_svc::request_translation(&state, auth.user_id, body).await)
}

/// `GET /api/translation/requests/{request_id}`.
pub async fn get_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<TranslationRequest>, ApiError> {
    let id = Uuid::parse_str(&raw_id).map_err(|_| ApiError::not_found(NOT_FOUND))?;
    translation_svc::get_request(&state, auth.user_id, id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// `GET /api/translation/languages`.
pub async fn languages() -> Json<Vec<SupportedLanguage>> {
    Json(translation_svc::supported_languages())
}

/// `POST /api/translation/translate?content=&source_lang=&target_lang=&preserve_formatting=`
/// — translated text as a JSON string.
pub async fn translate(_auth: AuthUser, Query(params): Query<DirectTranslation>) -> Json<String> {
    tracing::debug!(source = %params.source_lang, target = %params.target_lang, "direct translation");
    Json(translation_svc::translate_text(
        &params.content,
        &params.target_lang,
        params.preserve_formatting,
    ))
}

#[cfg(test)]
#[path = "translation_test.rs"]
mod tests;
