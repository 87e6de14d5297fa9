//! Vector store adapter for textbook retrieval.
//!
//! DESIGN
//! ======
//! Mirrors the `llm` module: env-driven config, one concrete client, and a
//! trait ([`VectorSearch`]) that the chatbot and retrieval routes depend on.
//! Absence of `QDRANT_URL` disables retrieval rather than failing startup.

pub mod config;
pub mod qdrant;
pub mod types;

use config::VectorConfig;
pub use types::{PayloadFilter, ScoredPassage, VectorError, VectorSearch};

pub struct VectorClient {
    inner: qdrant::QdrantClient,
}

impl VectorClient {
    /// # Errors
    ///
    /// Returns an error if `QDRANT_URL` is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, VectorError> {
        let config = VectorConfig::from_env()?;
        Ok(Self { inner: qdrant::QdrantClient::new(config)? })
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        self.inner.collection()
    }
}

#[async_trait::async_trait]
impl VectorSearch for VectorClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&PayloadFilter>,
    ) -> Result<Vec<ScoredPassage>, VectorError> {
        self.inner.query(query, limit, filter).await
    }
}
