//! Qdrant REST client using the universal `points/query` endpoint.
//!
//! Queries are sent as text documents so the store performs the embedding
//! server-side; this crate never computes vectors itself.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};

use super::config::VectorConfig;
use super::types::{PayloadFilter, ScoredPassage, VectorError};

pub struct QdrantClient {
    http: reqwest::Client,
    config: VectorConfig,
}

impl QdrantClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: VectorConfig) -> Result<Self, VectorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| VectorError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.config.collection
    }

    pub(crate) async fn query(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&PayloadFilter>,
    ) -> Result<Vec<ScoredPassage>, VectorError> {
        let body = build_query_request(&self.config.embedding_model, query, limit, filter);
        let url = format!("{}/collections/{}/points/query", self.config.url, self.config.collection);

        let mut request = self.http.post(url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("api-key", key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| VectorError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| VectorError::Request(e.to_string()))?;
        if status != 200 {
            return Err(VectorError::Response { status, body: text });
        }
        parse_query_response(&text)
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: QueryDocument<'a>,
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Serialize)]
struct QueryDocument<'a> {
    text: &'a str,
    model: &'a str,
}

fn build_query_request<'a>(
    model: &'a str,
    text: &'a str,
    limit: usize,
    filter: Option<&PayloadFilter>,
) -> QueryRequest<'a> {
    let filter = filter.filter(|f| !f.is_empty()).map(|f| {
        let must: Vec<Value> = f
            .iter()
            .map(|(key, value)| json!({ "key": key, "match": { "value": value } }))
            .collect();
        json!({ "must": must })
    });
    QueryRequest { query: QueryDocument { text, model }, limit, with_payload: true, filter }
}

/// Extract passages from a `points/query` reply. Missing payload keys default
/// to empty strings, and `source` to `"unknown"`.
pub(crate) fn parse_query_response(json_text: &str) -> Result<Vec<ScoredPassage>, VectorError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| VectorError::Parse(e.to_string()))?;
    let Some(points) = root
        .get("result")
        .and_then(|r| r.get("points"))
        .and_then(Value::as_array)
    else {
        return Err(VectorError::Parse("points/query: missing result.points".to_string()));
    };

    let payload_str = |point: &Value, key: &str| -> Option<String> {
        point
            .get("payload")
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    Ok(points
        .iter()
        .map(|point| {
            #[allow(clippy::cast_possible_truncation)]
            let similarity_score = point.get("score").and_then(Value::as_f64).unwrap_or(0.0) as f32;
            ScoredPassage {
                content_id: payload_str(point, "content_id").unwrap_or_default(),
                content: payload_str(point, "content").unwrap_or_default(),
                similarity_score,
                source: payload_str(point, "source").unwrap_or_else(|| "unknown".to_string()),
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "qdrant_test.rs"]
mod tests;
