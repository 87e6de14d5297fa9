//! Retrieval routes — semantic search plus direct content lookup.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::routes::content::{parse_content_id, parse_module_type};
use crate::services::content::{self as content_svc, Content, ContentType};
use crate::state::AppState;
use crate::vector::{PayloadFilter, ScoredPassage};

#[derive(Deserialize)]
pub struct RetrieveParams {
    #[serde(default)]
    pub query: String,
    pub top_k: Option<usize>,
}

/// `POST /api/retrieve?query=&top_k=` — nearest passages. The optional JSON
/// body holds exact-match payload filters.
pub async fn retrieve(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<RetrieveParams>,
    filter: Option<Json<PayloadFilter>>,
) -> Result<Json<Vec<ScoredPassage>>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("Query cannot be empty"));
    }
    let Some(vector) = state.vector.as_ref() else {
        warn!("vector store not configured; retrieval returns nothing");
        return Ok(Json(Vec::new()));
    };
    let limit = params.top_k.unwrap_or(state.chatbot.retrieval_top_k);
    let filter = filter.map(|Json(f)| f);
    match vector.search(query, limit, filter.as_ref()).await {
        Ok(passages) => Ok(Json(passages)),
        Err(e) => {
            warn!(error = %e, "retrieval search failed");
            Ok(Json(Vec::new()))
        }
    }
}

/// Trimmed content view used by retrieval clients.
#[derive(Debug, Serialize)]
pub struct RetrievedContent {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Content> for RetrievedContent {
    fn from(c: Content) -> Self {
        Self {
            id: c.id,
            title: c.title,
            content: c.content,
            content_type: c.content_type,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// `GET /api/retrieve/{content_id}`.
pub async fn retrieve_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<RetrievedContent>, ApiError> {
    let id = parse_content_id(&raw_id)?;
    content_svc::get_content(&state, id)
        .await
        .map(|c| Json(c.into()))
        .ok_or_else(|| ApiError::not_found("Content not found"))
}

/// `GET /api/retrieve/module/{module_type}`.
pub async fn retrieve_by_module(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_type): Path<String>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let module_type = parse_module_type(&raw_type)?;
    Ok(Json(content_svc::list_by_module(&state, module_type).await))
}

#[cfg(test)]
#[path = "retrieval_test.rs"]
mod tests;
