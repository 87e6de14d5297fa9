//! Textbook content table — CRUD over the in-memory `content` store.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    #[serde(rename = "ros_2")]
    Ros2,
    GazeboUnity,
    NvidiaIsaac,
    Vla,
    Humanoid,
    /// Uploaded or ingested material outside the five course modules.
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Chapter,
    Section,
    Example,
    Exercise,
    Video,
    CodeSnippet,
    Document,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub module_type: ModuleType,
    pub order: i32,
    pub parent_id: Option<String>,
    pub prerequisites: Vec<String>,
    pub author_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub module_type: ModuleType,
    pub order: i32,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<ContentType>,
    pub order: Option<i32>,
    pub parent_id: Option<String>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

pub async fn create_content(state: &AppState, new: NewContent, author_id: Option<Uuid>) -> Content {
    let now = OffsetDateTime::now_utc();
    let row = Content {
        id: Uuid::new_v4(),
        title: new.title,
        content: new.content,
        content_type: new.content_type,
        module_type: new.module_type,
        order: new.order,
        parent_id: new.parent_id,
        prerequisites: new.prerequisites,
        author_id,
        created_at: now,
        updated_at: now,
    };
    state.content.write().await.insert(row.id, row.clone());
    info!(content_id = %row.id, module = ?row.module_type, "content created");
    row
}

pub async fn get_content(state: &AppState, id: Uuid) -> Option<Content> {
    state.content.read().await.get(&id).cloned()
}

/// All content for one module, ascending by `order`.
pub async fn list_by_module(state: &AppState, module_type: ModuleType) -> Vec<Content> {
    let mut rows: Vec<Content> = state
        .content
        .read()
        .await
        .values()
        .filter(|c| c.module_type == module_type)
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
    rows
}

pub async fn update_content(state: &AppState, id: Uuid, update: ContentUpdate) -> Option<Content> {
    let mut table = state.content.write().await;
    let row = table.get_mut(&id)?;
    if let Some(title) = update.title {
        row.title = title;
    }
    if let Some(content) = update.content {
        row.content = content;
    }
    if let Some(content_type) = update.content_type {
        row.content_type = content_type;
    }
    if let Some(order) = update.order {
        row.order = order;
    }
    if let Some(parent_id) = update.parent_id {
        row.parent_id = Some(parent_id);
    }
    row.updated_at = OffsetDateTime::now_utc();
    Some(row.clone())
}

/// Returns `false` if nothing was deleted.
pub async fn delete_content(state: &AppState, id: Uuid) -> bool {
    let removed = state.content.write().await.remove(&id).is_some();
    if removed {
        info!(content_id = %id, "content deleted");
    }
    removed
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
