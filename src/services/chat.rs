//! Chat session and message persistence.
//!
//! DESIGN
//! ======
//! A session is owned either by a registered user or by an anonymous
//! pseudo-user minted at creation time. The two cases are stored in separate
//! columns and surfaced as [`SessionOwner`], which serializes to the user id
//! or to `anonymous_<uuid>`.
//!
//! ACCESS RULES
//! ============
//! Anonymous sessions are readable by anyone holding the id. Sessions owned
//! by a registered user are visible only to that user; every other caller sees
//! the same "not found" as for a missing id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Chat session not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            other => Err(format!("unknown message role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwner {
    User(Uuid),
    Anonymous(Uuid),
}

impl SessionOwner {
    /// Mint a fresh anonymous owner.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::Anonymous(Uuid::new_v4())
    }

    fn from_columns(user_id: Option<Uuid>, anonymous_id: Option<Uuid>) -> Self {
        match user_id {
            Some(id) => Self::User(id),
            None => Self::Anonymous(anonymous_id.unwrap_or_default()),
        }
    }

    #[must_use]
    pub fn readable_by(self, caller: Option<Uuid>) -> bool {
        match self {
            Self::Anonymous(_) => true,
            Self::User(owner) => caller == Some(owner),
        }
    }

    #[must_use]
    pub fn owned_by(self, caller: Uuid) -> bool {
        self == Self::User(caller)
    }
}

impl fmt::Display for SessionOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{id}"),
            Self::Anonymous(id) => write!(f, "anonymous_{id}"),
        }
    }
}

impl Serialize for SessionOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub owner: SessionOwner,
    pub title: String,
    pub context: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

type SessionTuple = (Uuid, Option<Uuid>, Option<Uuid>, String, serde_json::Value, OffsetDateTime, OffsetDateTime);

impl From<SessionTuple> for ChatSession {
    fn from(row: SessionTuple) -> Self {
        let (id, user_id, anonymous_id, title, context, created_at, updated_at) = row;
        Self { id, owner: SessionOwner::from_columns(user_id, anonymous_id), title, context, created_at, updated_at }
    }
}

const SESSION_COLUMNS: &str = "id, user_id, anonymous_id, title, context, created_at, updated_at";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub user_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

type MessageTuple = (Uuid, Uuid, String, String, Option<Uuid>, OffsetDateTime);

fn message_from_row(row: MessageTuple) -> ChatMessage {
    let (id, chat_session_id, role, content, user_id, created_at) = row;
    // The column CHECK constraint keeps this in the known set.
    let role = role.parse().unwrap_or(MessageRole::System);
    ChatMessage { id, chat_session_id, role, content, user_id, created_at }
}

fn empty_context(context: Option<serde_json::Value>) -> serde_json::Value {
    match context {
        Some(v @ serde_json::Value::Object(_)) => v,
        _ => serde_json::Value::Object(serde_json::Map::new()),
    }
}

// =============================================================================
// SESSIONS
// =============================================================================

/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(
    pool: &PgPool,
    owner: SessionOwner,
    title: &str,
    context: Option<serde_json::Value>,
) -> Result<ChatSession, ChatError> {
    let (user_id, anonymous_id) = match owner {
        SessionOwner::User(id) => (Some(id), None),
        SessionOwner::Anonymous(id) => (None, Some(id)),
    };
    let row = sqlx::query_as::<_, SessionTuple>(&format!(
        "INSERT INTO chat_sessions (id, user_id, anonymous_id, title, context)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {SESSION_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(anonymous_id)
    .bind(title)
    .bind(empty_context(context))
    .fetch_one(pool)
    .await?;

    let session = ChatSession::from(row);
    info!(session_id = %session.id, owner = %session.owner, "chat session created");
    Ok(session)
}

/// Fetch a session visible to `caller` (`None` = unauthenticated).
///
/// # Errors
///
/// Returns [`ChatError::NotFound`] if missing or owned by another user.
pub async fn get_session(pool: &PgPool, session_id: Uuid, caller: Option<Uuid>) -> Result<ChatSession, ChatError> {
    let row = sqlx::query_as::<_, SessionTuple>(&format!("SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE id = $1"))
        .bind(session_id)
        .fetch_optional(pool)
        .await?;
    row.map(ChatSession::from)
        .filter(|s| s.owner.readable_by(caller))
        .ok_or(ChatError::NotFound)
}

/// Fetch a session only if `caller` is its registered owner.
///
/// # Errors
///
/// Returns [`ChatError::NotFound`] otherwise.
pub async fn get_owned_session(pool: &PgPool, session_id: Uuid, caller: Uuid) -> Result<ChatSession, ChatError> {
    let session = get_session(pool, session_id, Some(caller)).await?;
    if session.owner.owned_by(caller) { Ok(session) } else { Err(ChatError::NotFound) }
}

/// Update title and/or context of a session owned by `caller`.
///
/// # Errors
///
/// Returns [`ChatError::NotFound`] if missing or not owned by `caller`.
pub async fn update_session(
    pool: &PgPool,
    session_id: Uuid,
    caller: Uuid,
    title: Option<&str>,
    context: Option<serde_json::Value>,
) -> Result<ChatSession, ChatError> {
    let row = sqlx::query_as::<_, SessionTuple>(&format!(
        "UPDATE chat_sessions
         SET title = COALESCE($3, title),
             context = COALESCE($4, context),
             updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING {SESSION_COLUMNS}"
    ))
    .bind(session_id)
    .bind(caller)
    .bind(title)
    .bind(context)
    .fetch_optional(pool)
    .await?;
    row.map(ChatSession::from).ok_or(ChatError::NotFound)
}

/// Sessions owned by `user_id`, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_user_sessions(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatSession>, ChatError> {
    let rows = sqlx::query_as::<_, SessionTuple>(&format!(
        "SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ChatSession::from).collect())
}

// =============================================================================
// MESSAGES
// =============================================================================

/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn add_message(
    pool: &PgPool,
    session_id: Uuid,
    role: MessageRole,
    content: &str,
    user_id: Option<Uuid>,
) -> Result<ChatMessage, ChatError> {
    let row = sqlx::query_as::<_, MessageTuple>(
        "INSERT INTO chat_messages (id, chat_session_id, role, content, user_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, chat_session_id, role, content, user_id, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(session_id)
    .bind(role.as_str())
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(message_from_row(row))
}

/// The most recent `limit` messages, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn recent_messages(pool: &PgPool, session_id: Uuid, limit: i64) -> Result<Vec<ChatMessage>, ChatError> {
    let mut rows = sqlx::query_as::<_, MessageTuple>(
        "SELECT id, chat_session_id, role, content, user_id, created_at
         FROM chat_messages
         WHERE chat_session_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(session_id)
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;
    rows.reverse();
    Ok(rows.into_iter().map(message_from_row).collect())
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
