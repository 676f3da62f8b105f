pub mod error;
pub mod join;
pub mod query;

pub use error::EnrichError;
pub use join::CompositeRecord;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use extract::{ExtractParams, Keyphrase, KeyphraseExtractor};
use wikimedia::{EntityClient, PageInfoClient, SearchClient};

use crate::error::Result;

/// Per-stage counts and timings for one enrichment pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichTrace {
    pub keyphrases: usize,
    pub hits: usize,
    pub pages: usize,
    pub entities_linked: usize,
    pub extract_ms: u64,
    pub search_ms: u64,
    pub pages_ms: u64,
    pub entities_ms: u64,
}

/// The unit returned to callers: ranked keyphrases plus one composite
/// record per search hit, in search-relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedReport {
    pub keyphrases: Vec<Keyphrase>,
    pub records: Vec<CompositeRecord>,
    pub trace: EnrichTrace,
}

pub struct EnrichmentPipeline {
    extractor: KeyphraseExtractor,
    search: SearchClient,
    pages: PageInfoClient,
    entities: EntityClient,
}

impl EnrichmentPipeline {
    pub fn new(
        extractor: KeyphraseExtractor,
        search: SearchClient,
        pages: PageInfoClient,
        entities: EntityClient,
    ) -> Self {
        Self {
            extractor,
            search,
            pages,
            entities,
        }
    }

    pub fn default() -> Self {
        Self::new(
            KeyphraseExtractor::default(),
            SearchClient::default(),
            PageInfoClient::default(),
            EntityClient::default(),
        )
    }

    /// Run one full enrichment pass over a passage.
    ///
    /// Stages run strictly in sequence; a failure at any stage aborts the
    /// invocation with no partial output. All state is per-call, so
    /// concurrent passes share nothing.
    pub async fn enrich(&self, text: &str, params: &ExtractParams) -> Result<EnrichedReport> {
        // Step 1: Extract keyphrases
        let started = Instant::now();
        let keyphrases = self.extractor.extract(text, params).await?;
        let extract_ms = started.elapsed().as_millis() as u64;
        info!(count = keyphrases.len(), elapsed_ms = extract_ms, "extracted keyphrases");

        // Step 2: Build the disjunctive search query
        let phrases: Vec<String> = keyphrases.iter().map(|k| k.phrase.clone()).collect();
        let search_query = query::or_join(&phrases);

        // Step 3: Search
        let started = Instant::now();
        let hits = self.search.search(&search_query).await?;
        let search_ms = started.elapsed().as_millis() as u64;
        info!(hits = hits.len(), elapsed_ms = search_ms, "search finished");

        // Step 4: Fetch page metadata for every hit in one batch
        let pageids: Vec<u64> = hits.iter().map(|hit| hit.pageid).collect();
        let started = Instant::now();
        let pages = self.pages.fetch_pages(&pageids).await?;
        let pages_ms = started.elapsed().as_millis() as u64;
        info!(pages = pages.len(), elapsed_ms = pages_ms, "page info finished");

        // Step 5: Collect linked item ids and fetch entities
        let item_ids: Vec<String> = pageids
            .iter()
            .filter_map(|id| pages.get(id))
            .filter_map(|page| page.wikibase_item())
            .map(|id| id.to_string())
            .collect();
        let started = Instant::now();
        let entities = self.entities.fetch_entities(&item_ids).await?;
        let entities_ms = started.elapsed().as_millis() as u64;
        info!(entities = entities.len(), elapsed_ms = entities_ms, "entity lookup finished");

        // Step 6: Join, preserving search order
        let records = join::join(&hits, &pages, &entities)?;
        let entities_linked = records.iter().filter(|r| r.entity.is_some()).count();

        Ok(EnrichedReport {
            trace: EnrichTrace {
                keyphrases: keyphrases.len(),
                hits: hits.len(),
                pages: pages.len(),
                entities_linked,
                extract_ms,
                search_ms,
                pages_ms,
                entities_ms,
            },
            keyphrases,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::EmbeddingClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEXT: &str = "Researchers are studying an ancient puppy preserved in permafrost.";

    async fn mock_embeddings(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": [0.3, 0.2, 0.1]
            })))
            .mount(server)
            .await;
    }

    async fn mock_search(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(query_param("list", "search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mock_pages(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(query_param("prop", "pageprops|pageterms|pageimages|extracts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mock_entities(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(query_param("action", "wbgetentities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn pipeline_for(server: &MockServer) -> EnrichmentPipeline {
        EnrichmentPipeline::new(
            KeyphraseExtractor::new(EmbeddingClient::new(
                server.uri(),
                "nomic-embed-text".to_string(),
            )),
            SearchClient::new(server.uri()),
            PageInfoClient::new(server.uri()),
            EntityClient::new(server.uri()),
        )
    }

    #[tokio::test]
    async fn test_enrich_joins_all_stages_in_hit_order() {
        let server = MockServer::start().await;
        mock_embeddings(&server).await;
        mock_search(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "search": [
                    { "pageid": 1, "title": "First" },
                    { "pageid": 2, "title": "Second" }
                ] }
            }),
        )
        .await;
        mock_pages(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "pages": [
                    { "pageid": 1, "title": "First", "pageprops": { "wikibase_item": "Q1" } },
                    { "pageid": 2, "title": "Second" }
                ] }
            }),
        )
        .await;
        mock_entities(
            &server,
            serde_json::json!({
                "entities": { "Q1": { "id": "Q1", "claims": {} } }
            }),
        )
        .await;

        let pipeline = pipeline_for(&server);
        let report = pipeline
            .enrich(TEXT, &ExtractParams::default())
            .await
            .unwrap();

        assert!(!report.keyphrases.is_empty());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].search.pageid, 1);
        assert_eq!(report.records[0].entity.as_ref().unwrap().id, "Q1");
        assert_eq!(report.records[1].search.pageid, 2);
        assert!(report.records[1].entity.is_none());
        assert_eq!(report.trace.hits, 2);
        assert_eq!(report.trace.entities_linked, 1);
    }

    #[tokio::test]
    async fn test_enrich_aborts_on_incomplete_search_response() {
        let server = MockServer::start().await;
        mock_embeddings(&server).await;
        // No completion marker in the search envelope.
        mock_search(
            &server,
            serde_json::json!({
                "continue": { "sroffset": 10 },
                "query": { "search": [ { "pageid": 1, "title": "First" } ] }
            }),
        )
        .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .enrich(TEXT, &ExtractParams::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EnrichError::Wikimedia(wikimedia::WikimediaError::IncompleteResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_enrich_aborts_when_page_batch_omits_a_hit() {
        let server = MockServer::start().await;
        mock_embeddings(&server).await;
        mock_search(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "search": [
                    { "pageid": 1, "title": "First" },
                    { "pageid": 2, "title": "Second" }
                ] }
            }),
        )
        .await;
        mock_pages(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "pages": [ { "pageid": 1, "title": "First" } ] }
            }),
        )
        .await;
        mock_entities(&server, serde_json::json!({ "entities": {} })).await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .enrich(TEXT, &ExtractParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::MissingPage { pageid: 2 }));
    }

    #[tokio::test]
    async fn test_enrich_with_no_linked_items_skips_entity_request() {
        let server = MockServer::start().await;
        mock_embeddings(&server).await;
        mock_search(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "search": [ { "pageid": 7, "title": "Only" } ] }
            }),
        )
        .await;
        mock_pages(
            &server,
            serde_json::json!({
                "batchcomplete": true,
                "query": { "pages": [ { "pageid": 7, "title": "Only" } ] }
            }),
        )
        .await;
        // No wbgetentities mock mounted: the stage must not issue a request.

        let pipeline = pipeline_for(&server);
        let report = pipeline
            .enrich(TEXT, &ExtractParams::default())
            .await
            .unwrap();

        assert_eq!(report.records.len(), 1);
        assert!(report.records[0].entity.is_none());
        assert_eq!(report.trace.entities_linked, 0);
    }
}
