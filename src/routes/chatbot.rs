//! Chatbot routes — sessions, RAG queries, selected-text questions, history.
//!
//! Sessions may be created without a token; those are owned by a fresh
//! anonymous id and stay readable by anyone holding the session id.
//! Ownership failures are reported as 404 so session ids are not confirmed
//! to strangers. A token for an account that no longer exists is treated
//! as no token at all.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::{AuthUser, MaybeAuthUser};
use crate::services::auth as auth_svc;
use crate::services::chat::{self, ChatMessage, ChatSession, SessionOwner};
use crate::services::rag::{self, ChatAnswer};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::from(chat::ChatError::NotFound))
}

/// Rejects blank queries. Accepted queries are used verbatim.
fn require_query(query: &str) -> Result<(), ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("Query cannot be empty"));
    }
    Ok(())
}

/// A valid token whose subject no longer has an account acts as anonymous.
async fn known_caller(state: &AppState, caller: Option<Uuid>) -> Result<Option<Uuid>, ApiError> {
    let Some(user_id) = caller else {
        return Ok(None);
    };
    if auth_svc::get_user(&state.pool, user_id).await?.is_some() {
        return Ok(Some(user_id));
    }
    tracing::debug!(%user_id, "token subject has no account; treating caller as anonymous");
    Ok(None)
}

#[derive(Deserialize)]
pub struct CreateSessionBody {
    pub title: String,
    pub context: Option<Value>,
}

/// `POST /api/chatbot/sessions` — owned by the caller, or anonymous.
pub async fn create_session(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Json(body): Json<CreateSessionBody>,
) -> Result<Json<ChatSession>, ApiError> {
    let caller = known_caller(&state, caller).await?;
    let owner = caller.map_or_else(SessionOwner::anonymous, SessionOwner::User);
    let session = chat::create_session(&state.pool, owner, &body.title, body.context).await?;
    Ok(Json(session))
}

/// `GET /api/chatbot/sessions/` — the caller's sessions, newest first.
pub async fn list_sessions(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<ChatSession>>, ApiError> {
    Ok(Json(chat::list_user_sessions(&state.pool, auth.user_id).await?))
}

/// `GET /api/chatbot/sessions/{id}`.
pub async fn get_session(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<ChatSession>, ApiError> {
    let id = parse_session_id(&raw_id)?;
    Ok(Json(chat::get_session(&state.pool, id, caller).await?))
}

#[derive(Deserialize)]
pub struct UpdateSessionBody {
    pub title: Option<String>,
    pub context: Option<Value>,
}

/// `PUT /api/chatbot/sessions/{id}` — owner only.
pub async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateSessionBody>,
) -> Result<Json<ChatSession>, ApiError> {
    let id = parse_session_id(&raw_id)?;
    let session = chat::update_session(&state.pool, id, auth.user_id, body.title.as_deref(), body.context).await?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub query: String,
}

/// `POST /api/chatbot/sessions/{id}/query?query=` — answer from the textbook.
pub async fn query_session(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(raw_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ChatAnswer>, ApiError> {
    require_query(&params.query)?;
    let id = parse_session_id(&raw_id)?;
    let caller = known_caller(&state, caller).await?;
    chat::get_session(&state.pool, id, caller).await?;
    Ok(Json(rag::process_query(&state, id, &params.query, caller).await?))
}

#[derive(Deserialize)]
pub struct SelectedTextParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub selected_text: String,
}

/// `POST /api/chatbot/enforce-selected-text?query=&selected_text=`.
pub async fn enforce_selected_text(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SelectedTextParams>,
) -> Result<Json<ChatAnswer>, ApiError> {
    require_query(&params.query)?;
    if params.selected_text.trim().is_empty() {
        return Err(ApiError::bad_request("Selected text cannot be empty"));
    }
    Ok(Json(rag::answer_selected_text(&state, &params.query, &params.selected_text).await))
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// `GET /api/chatbot/sessions/{id}/history?limit=` — owner only, oldest first.
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let id = parse_session_id(&raw_id)?;
    chat::get_owned_session(&state.pool, id, auth.user_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(chat::recent_messages(&state.pool, id, limit).await?))
}

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;
