use serde_json::Value;
use tracing::info;

use crate::error::{Result, WikimediaError};
use crate::params::SearchRequest;
use crate::types::SearchHit;
use crate::{WIKIPEDIA_API_URL, ensure_batch_complete};

#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    client: reqwest::Client,
}

impl SearchClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn default() -> Self {
        Self::new(WIKIPEDIA_API_URL.to_string())
    }

    /// Run one free-text search.
    ///
    /// Hits come back in the relevance order supplied by the API. Only the
    /// first page of results is consumed; continuation tokens are ignored.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        info!(query, "querying search api");

        let request = SearchRequest {
            query: query.to_string(),
        };

        let response = self.client
            .get(&self.base_url)
            .query(&request.query_pairs())
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_search_response(body)
    }
}

fn parse_search_response(body: Value) -> Result<Vec<SearchHit>> {
    ensure_batch_complete(&body, "search")?;

    let hits = body
        .get("query")
        .and_then(|q| q.get("search"))
        .and_then(|s| s.as_array())
        .ok_or_else(|| WikimediaError::UnexpectedShape {
            endpoint: "search",
            detail: "missing query.search array".to_string(),
        })?;

    let mut parsed = Vec::with_capacity(hits.len());
    for hit in hits {
        parsed.push(serde_json::from_value(hit.clone())?);
    }

    Ok(parsed)
}
