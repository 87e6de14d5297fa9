//! Ingestion routes — accept uploaded documents and raw text as content.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::services::content::{self as content_svc, ContentType, ModuleType, NewContent};
use crate::state::AppState;

pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "application/pdf",
    "text/plain",
    "text/markdown",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Serialize)]
pub struct DocumentIngested {
    pub message: &'static str,
    pub document_id: Uuid,
    pub filename: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct TextIngested {
    pub message: &'static str,
    pub content_id: Uuid,
    pub title: String,
}

fn check_mime(mime: &str) -> Result<(), ApiError> {
    if ALLOWED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "File type {mime} not supported. Allowed types: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )))
    }
}

/// `POST /api/ingest` — multipart upload with a `file` part.
pub async fn ingest_document(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentIngested>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mime = field.content_type().unwrap_or("application/octet-stream").to_string();
        check_mime(&mime)?;
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let size = text.len();

        let new = NewContent {
            title: filename.clone(),
            content: text,
            content_type: ContentType::Document,
            module_type: ModuleType::Document,
            order: 0,
            parent_id: None,
            prerequisites: Vec::new(),
        };
        let created = content_svc::create_content(&state, new, Some(auth.user_id)).await;
        info!(user_id = %auth.user_id, document_id = %created.id, %mime, size, "document ingested");
        return Ok((
            StatusCode::CREATED,
            Json(DocumentIngested {
                message: "Document ingested successfully",
                document_id: created.id,
                filename,
                size,
            }),
        ));
    }
    Err(ApiError::bad_request("Missing file field"))
}

/// `POST /api/ingest/text` — store a content body as-is.
pub async fn ingest_text(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewContent>,
) -> (StatusCode, Json<TextIngested>) {
    let created = content_svc::create_content(&state, body, Some(auth.user_id)).await;
    info!(user_id = %auth.user_id, content_id = %created.id, "text ingested");
    (
        StatusCode::CREATED,
        Json(TextIngested {
            message: "Text content ingested successfully",
            content_id: created.id,
            title: created.title,
        }),
    )
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
