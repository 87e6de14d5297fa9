//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Accounts and chat history live in Postgres behind `pool`. Content,
//! progress, personalization and translation requests are held in the
//! in-memory tables below and are lost on restart. Each table has its own
//! lock so unrelated writes never contend.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{AuthConfig, ChatbotConfig};
use crate::llm::LlmChat;
use crate::services::content::Content;
use crate::services::personalization::{ContentPersonalization, PersonalizationProfile};
use crate::services::progress::{LearningPath, QuizAttempt, UserProgress};
use crate::services::translation::TranslationRequest;
use crate::vector::VectorSearch;

pub type Table<K, V> = Arc<RwLock<HashMap<K, V>>>;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: Arc<AuthConfig>,
    pub chatbot: ChatbotConfig,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Optional vector store. `None` if `QDRANT_URL` is not configured.
    pub vector: Option<Arc<dyn VectorSearch>>,

    pub content: Table<Uuid, Content>,
    /// Keyed by `(user_id, content_id)`.
    pub progress: Table<(Uuid, String), UserProgress>,
    pub quiz_attempts: Arc<RwLock<Vec<QuizAttempt>>>,
    pub learning_paths: Table<Uuid, LearningPath>,
    /// Keyed by `user_id`.
    pub profiles: Table<Uuid, PersonalizationProfile>,
    /// Keyed by `(content_id, user_id)`.
    pub personalized: Table<(Uuid, Uuid), ContentPersonalization>,
    pub translations: Table<Uuid, TranslationRequest>,
}

impl AppState {
    #[must_use]
    pub fn new(
        pool: PgPool,
        auth: AuthConfig,
        chatbot: ChatbotConfig,
        llm: Option<Arc<dyn LlmChat>>,
        vector: Option<Arc<dyn VectorSearch>>,
    ) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
            chatbot,
            llm,
            vector,
            content: Arc::default(),
            progress: Arc::default(),
            quiz_attempts: Arc::default(),
            learning_paths: Arc::default(),
            profiles: Arc::default(),
            personalized: Arc::default(),
            translations: Arc::default(),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
