use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use crate::error::{Result, WikimediaError};
use crate::params::PageInfoRequest;
use crate::types::PageInfo;
use crate::{WIKIPEDIA_API_URL, ensure_batch_complete};

#[derive(Clone)]
pub struct PageInfoClient {
    base_url: String,
    client: reqwest::Client,
}

impl PageInfoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn default() -> Self {
        Self::new(WIKIPEDIA_API_URL.to_string())
    }

    /// Fetch extended metadata for a batch of pages in one request.
    ///
    /// Redirect resolution is on, so the returned record describes the
    /// canonical page. Ids the API does not know are absent from the map.
    pub async fn fetch_pages(&self, pageids: &[u64]) -> Result<HashMap<u64, PageInfo>> {
        if pageids.is_empty() {
            return Ok(HashMap::new());
        }

        info!(pages = pageids.len(), "querying page info api");

        let request = PageInfoRequest {
            pageids: pageids.to_vec(),
        };

        let response = self.client
            .get(&self.base_url)
            .query(&request.query_pairs())
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_pages_response(body)
    }
}

fn parse_pages_response(body: Value) -> Result<HashMap<u64, PageInfo>> {
    ensure_batch_complete(&body, "page info")?;

    let pages = body
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| WikimediaError::UnexpectedShape {
            endpoint: "page info",
            detail: "missing query.pages array".to_string(),
        })?;

    let mut parsed = HashMap::with_capacity(pages.len());
    for page in pages {
        // Unknown or deleted ids come back flagged as missing.
        if page.get("missing").is_some() {
            continue;
        }
        let mut info: PageInfo = serde_json::from_value(page.clone())?;
        info.url = PageInfo::page_url(info.pageid);
        parsed.insert(info.pageid, info);
    }

    Ok(parsed)
}
