//! Vector store configuration parsed from environment variables.

use super::types::VectorError;
use crate::config::env_parse;

pub const DEFAULT_COLLECTION: &str = "textbook_content";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-minilm-l6-v2";
pub const DEFAULT_QDRANT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
    pub embedding_model: String,
    pub request_timeout_secs: u64,
}

impl VectorConfig {
    /// Required:
    /// - `QDRANT_URL`
    ///
    /// Optional:
    /// - `QDRANT_API_KEY`
    /// - `QDRANT_COLLECTION`: default `textbook_content`
    /// - `QDRANT_EMBEDDING_MODEL`: model used for server-side query inference
    /// - `QDRANT_REQUEST_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::MissingUrl`] if `QDRANT_URL` is unset or blank.
    pub fn from_env() -> Result<Self, VectorError> {
        let url = std::env::var("QDRANT_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .ok_or(VectorError::MissingUrl)?
            .trim_end_matches('/')
            .to_string();
        let api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let collection = std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());
        let embedding_model =
            std::env::var("QDRANT_EMBEDDING_MODEL").unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let request_timeout_secs = env_parse("QDRANT_REQUEST_TIMEOUT_SECS", DEFAULT_QDRANT_REQUEST_TIMEOUT_SECS);

        Ok(Self { url, api_key, collection, embedding_model, request_timeout_secs })
    }
}
