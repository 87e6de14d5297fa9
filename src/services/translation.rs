//! Translation requests and direct translation.
//!
//! DESIGN
//! ======
//! A request is stored as `pending` and handed to a detached tokio task that
//! moves it through `in_progress` to `completed`. The task is never joined;
//! callers poll the request by id. Translation itself is a placeholder that
//! tags the text with the target language, running the formatting guard for
//! Urdu output.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::formatting;
use crate::state::{AppState, Table};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: String,
    pub source_language: String,
    pub target_language: String,
    /// Free-form tag such as `text`, `code` or `equation`.
    pub content_type: String,
    pub preserve_formatting: bool,
    pub status: TranslationStatus,
    pub translated_content: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

fn yes() -> bool {
    true
}

fn english() -> String {
    "en".into()
}

fn urdu() -> String {
    "ur".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTranslationRequest {
    pub content_id: String,
    pub source_language: String,
    pub target_language: String,
    pub content_type: String,
    #[serde(default = "yes")]
    pub preserve_formatting: bool,
}

/// Query parameters of a direct translation call.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectTranslation {
    pub content: String,
    #[serde(default = "english")]
    pub source_lang: String,
    #[serde(default = "urdu")]
    pub target_lang: String,
    #[serde(default = "yes")]
    pub preserve_formatting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportedLanguage {
    pub language_code: &'static str,
    pub language_name: &'static str,
    pub is_enabled: bool,
    pub supports_formatting: bool,
}

#[must_use]
pub fn supported_languages() -> Vec<SupportedLanguage> {
    vec![
        SupportedLanguage { language_code: "en", language_name: "English", is_enabled: true, supports_formatting: true },
        SupportedLanguage { language_code: "ur", language_name: "Urdu", is_enabled: true, supports_formatting: true },
    ]
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Translate `content` directly.
#[must_use]
pub fn translate_text(content: &str, target_lang: &str, preserve_formatting: bool) -> String {
    if target_lang == "ur" {
        let translated = format!("(UR TRANSLATION)\n\n{content}");
        if preserve_formatting {
            formatting::preserve_formatting(&translated)
        } else {
            translated
        }
    } else {
        format!("({} TRANSLATION) {content}", target_lang.to_uppercase())
    }
}

/// Placeholder output for a queued request.
#[must_use]
pub fn render_request(content_id: &str, source_lang: &str, target_lang: &str, preserve_formatting: bool) -> String {
    let tag = target_lang.to_uppercase();
    if target_lang == "ur" {
        let mut out = format!(
            "({tag} TRANSLATION) This is the translated content for {content_id}. \
             The original content has been translated from {source_lang} to {target_lang}."
        );
        if preserve_formatting {
            out.push_str("\n\n(Formatting preserved: Code blocks, equations, and special formatting maintained)");
        }
        out
    } else {
        format!("({tag} TRANSLATION) Translated content for {content_id} from {source_lang} to {target_lang}")
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Store a pending request and start processing it in the background.
pub async fn request_translation(state: &AppState, user_id: Uuid, new: NewTranslationRequest) -> TranslationRequest {
    let now = OffsetDateTime::now_utc();
    let request = TranslationRequest {
        id: Uuid::new_v4(),
        user_id,
        content_id: new.content_id,
        source_language: new.source_language,
        target_language: new.target_language,
        content_type: new.content_type,
        preserve_formatting: new.preserve_formatting,
        status: TranslationStatus::Pending,
        translated_content: None,
        created_at: now,
        updated_at: now,
        completed_at: None,
    };
    state.translations.write().await.insert(request.id, request.clone());
    info!(%user_id, request_id = %request.id, target = %request.target_language, "translation requested");

    let table = state.translations.clone();
    let id = request.id;
    tokio::spawn(async move { process_request(&table, id).await });
    request
}

/// Drive one request to completion. Unknown ids are ignored.
pub async fn process_request(table: &Table<Uuid, TranslationRequest>, id: Uuid) {
    let rendered = {
        let mut guard = table.write().await;
        let Some(request) = guard.get_mut(&id) else {
            debug!(request_id = %id, "translation request vanished before processing");
            return;
        };
        request.status = TranslationStatus::InProgress;
        request.updated_at = OffsetDateTime::now_utc();
        render_request(
            &request.content_id,
            &request.source_language,
            &request.target_language,
            request.preserve_formatting,
        )
    };

    let mut guard = table.write().await;
    if let Some(request) = guard.get_mut(&id) {
        let now = OffsetDateTime::now_utc();
        request.translated_content = Some(rendered);
        request.status = TranslationStatus::Completed;
        request.completed_at = Some(now);
        request.updated_at = now;
        info!(request_id = %id, "translation completed");
    }
}

/// `None` when missing or requested by another user.
pub async fn get_request(state: &AppState, user_id: Uuid, id: Uuid) -> Option<TranslationRequest> {
    state
        .translations
        .read()
        .await
        .get(&id)
        .filter(|r| r.user_id == user_id)
        .cloned()
}

#[cfg(test)]
#[path = "translation_test.rs"]
mod tests;
