//! Vector search types — scored passages, filters, and errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("QDRANT_URL not set")]
    MissingUrl,

    #[error("vector search request failed: {0}")]
    Request(String),

    #[error("vector search response error: status {status}")]
    Response { status: u16, body: String },

    #[error("vector search response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// One retrieved textbook passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub content_id: String,
    pub content: String,
    pub similarity_score: f32,
    pub source: String,
}

/// Exact-match constraints on payload keys. Empty means unfiltered.
pub type PayloadFilter = BTreeMap<String, serde_json::Value>;

/// Nearest-neighbour search over the textbook collection. Enables mocking in tests.
#[async_trait::async_trait]
pub trait VectorSearch: Send + Sync {
    /// Return at most `limit` passages, best match first.
    ///
    /// # Errors
    ///
    /// Returns a [`VectorError`] if the store is unreachable or replies with garbage.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&PayloadFilter>,
    ) -> Result<Vec<ScoredPassage>, VectorError>;
}
