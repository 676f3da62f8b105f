use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use crate::WIKIDATA_API_URL;
use crate::error::{Result, WikimediaError};
use crate::params::EntityRequest;
use crate::types::WikidataEntity;

#[derive(Clone)]
pub struct EntityClient {
    base_url: String,
    client: reqwest::Client,
}

impl EntityClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn default() -> Self {
        Self::new(WIKIDATA_API_URL.to_string())
    }

    /// Fetch a batch of entities in one request.
    ///
    /// Ids are deduplicated before the call. An id requested but absent
    /// from the response (deleted, invalid) is simply missing from the
    /// returned map; callers treat that as "no entity".
    pub async fn fetch_entities(&self, ids: &[String]) -> Result<HashMap<String, WikidataEntity>> {
        let request = EntityRequest { ids: ids.to_vec() };
        if request.distinct_ids().is_empty() {
            return Ok(HashMap::new());
        }

        info!(ids = request.distinct_ids().len(), "querying entity api");

        let response = self.client
            .get(&self.base_url)
            .query(&request.query_pairs())
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_entities_response(body)
    }
}

fn parse_entities_response(body: Value) -> Result<HashMap<String, WikidataEntity>> {
    let entities = body
        .get("entities")
        .and_then(|e| e.as_object())
        .ok_or_else(|| WikimediaError::UnexpectedShape {
            endpoint: "entities",
            detail: "missing entities object".to_string(),
        })?;

    let mut parsed = HashMap::with_capacity(entities.len());
    for (id, value) in entities {
        if value.get("missing").is_some() {
            continue;
        }
        let mut entity: WikidataEntity = serde_json::from_value(value.clone())?;
        entity.url = WikidataEntity::entity_url(&entity.id);
        parsed.insert(id.clone(), entity);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn entities_body() -> Value {
        serde_json::json!({
            "success": 1,
            "entities": {
                "Q144": {
                    "id": "Q144",
                    "labels": { "en": { "language": "en", "value": "dog" } },
                    "descriptions": { "en": { "language": "en", "value": "domesticated canine" } },
                    "claims": {}
                },
                "Q18498": {
                    "id": "Q18498",
                    "missing": ""
                }
            }
        })
    }

    #[test]
    fn test_parse_keys_entities_by_id_and_derives_url() {
        let entities = parse_entities_response(entities_body()).unwrap();
        let dog = &entities["Q144"];
        assert_eq!(dog.label("en"), Some("dog"));
        assert_eq!(dog.url, "https://www.wikidata.org/wiki/Q144");
    }

    #[test]
    fn test_parse_drops_missing_entities() {
        let entities = parse_entities_response(entities_body()).unwrap();
        assert_eq!(entities.len(), 1);
        assert!(!entities.contains_key("Q18498"));
    }

    #[test]
    fn test_parse_rejects_missing_entities_object() {
        let body = serde_json::json!({ "error": { "code": "no-such-entity" } });
        let err = parse_entities_response(body).unwrap_err();
        assert!(matches!(err, WikimediaError::UnexpectedShape { .. }));
    }

    #[tokio::test]
    async fn test_fetch_entities_dedups_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "wbgetentities"))
            .and(query_param("ids", "Q144|Q18498"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entities_body()))
            .mount(&server)
            .await;

        let client = EntityClient::new(server.uri());
        let ids = vec![
            "Q144".to_string(),
            "Q18498".to_string(),
            "Q144".to_string(),
        ];
        let entities = client.fetch_entities(&ids).await.unwrap();
        assert_eq!(entities.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_entities_empty_input_skips_request() {
        let server = MockServer::start().await;
        let client = EntityClient::new(server.uri());
        let entities = client.fetch_entities(&[]).await.unwrap();
        assert!(entities.is_empty());
    }
}
