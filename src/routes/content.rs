//! Content routes — textbook content CRUD and the fixed course outline.

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::services::catalog::{self, Chapter, Module};
use crate::services::content::{self as content_svc, Content, ContentUpdate, ModuleType, NewContent};
use crate::state::AppState;

const NOT_FOUND: &str = "Content not found";

/// Content ids are UUIDs; anything else cannot exist.
pub(crate) fn parse_content_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(NOT_FOUND))
}

pub(crate) fn parse_module_type(raw: &str) -> Result<ModuleType, ApiError> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| ApiError::bad_request(format!("Invalid module type: {raw}")))
}

/// `POST /api/` — create a content item authored by the caller.
pub async fn create_content(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewContent>,
) -> Json<Content> {
    Json(content_svc::create_content(&state, body, Some(auth.user_id)).await)
}

/// `GET /api/{content_id}`.
pub async fn get_content(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<Content>, ApiError> {
    let id = parse_content_id(&raw_id)?;
    content_svc::get_content(&state, id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// `GET /api/module/{module_type}` — content of one module, in order.
pub async fn list_module_content(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let module_type = parse_module_type(&raw_type)?;
    Ok(Json(content_svc::list_by_module(&state, module_type).await))
}

/// `PUT /api/{content_id}` — partial update.
pub async fn update_content(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(body): Json<ContentUpdate>,
) -> Result<Json<Content>, ApiError> {
    let id = parse_content_id(&raw_id)?;
    content_svc::update_content(&state, id, body)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// `DELETE /api/{content_id}`.
pub async fn delete_content(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_content_id(&raw_id)?;
    if content_svc::delete_content(&state, id).await {
        Ok(Json(json!({ "message": "Content deleted successfully" })))
    } else {
        Err(ApiError::not_found(NOT_FOUND))
    }
}

/// `GET /api/modules/`.
pub async fn list_modules() -> Json<Vec<Module>> {
    Json(catalog::modules())
}

/// `GET /api/modules/{module_id}/chapters`.
pub async fn list_chapters(Path(module_id): Path<String>) -> Json<Vec<Chapter>> {
    Json(catalog::chapters(&module_id))
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
