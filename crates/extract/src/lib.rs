pub mod candidates;
pub mod embeddings;
pub mod error;
pub mod mmr;
pub mod schema;

pub use embeddings::EmbeddingClient;
pub use error::ExtractError;
pub use schema::{ExtractParams, Keyphrase};

use tracing::debug;

use crate::error::Result;

pub struct KeyphraseExtractor {
    embeddings: EmbeddingClient,
}

impl KeyphraseExtractor {
    pub fn new(embeddings: EmbeddingClient) -> Self {
        Self { embeddings }
    }

    pub fn default() -> Self {
        Self::new(EmbeddingClient::default())
    }

    /// Extract ranked keyphrases from text.
    ///
    /// Returns at most `params.top_n` phrases in descending score order. An
    /// empty result (text with no usable candidates) is not an error.
    pub async fn extract(&self, text: &str, params: &ExtractParams) -> Result<Vec<Keyphrase>> {
        validate(text, params)?;

        let candidates = candidates::generate_candidates(text, params.ngram_range);
        debug!(candidates = candidates.len(), "generated candidate phrases");
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let doc_embedding = self.embeddings.embed(text).await?;
        let candidate_embeddings = self.embeddings.embed_batch(&candidates).await?;

        // The diversity selection can come back empty at a requested count;
        // shrink the count until something is returned, bottoming out at zero.
        let mut try_top_n = params.top_n;
        while try_top_n > 0 {
            let phrases = mmr::select_diverse(
                &doc_embedding,
                &candidates,
                &candidate_embeddings,
                try_top_n,
                params.diversity,
            );
            if !phrases.is_empty() {
                return Ok(phrases);
            }
            try_top_n -= 1;
        }

        Ok(Vec::new())
    }
}

fn validate(text: &str, params: &ExtractParams) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ExtractError::InvalidParams("text must be non-empty".to_string()));
    }
    if params.top_n == 0 {
        return Err(ExtractError::InvalidParams("top_n must be at least 1".to_string()));
    }
    let (min_n, max_n) = params.ngram_range;
    if min_n < 1 || max_n < min_n {
        return Err(ExtractError::InvalidParams(format!(
            "ngram_range ({}, {}) must satisfy 1 <= min <= max",
            min_n, max_n
        )));
    }
    if !(0.0..=1.0).contains(&params.diversity) {
        return Err(ExtractError::InvalidParams(format!(
            "diversity {} must be within [0, 1]",
            params.diversity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor_for(server: &MockServer) -> KeyphraseExtractor {
        KeyphraseExtractor::new(EmbeddingClient::new(
            server.uri(),
            "nomic-embed-text".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_extract_returns_ranked_phrases() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": [0.4, 0.3, 0.2]
            })))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server);
        let params = ExtractParams {
            top_n: 3,
            ..ExtractParams::default()
        };

        let phrases = extractor
            .extract("ancient puppy preserved permafrost", &params)
            .await
            .unwrap();

        assert!(!phrases.is_empty());
        assert!(phrases.len() <= 3);
        for pair in phrases.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_extract_without_candidates_is_empty_not_error() {
        // All stop words: no candidates, no embedding calls issued.
        let server = MockServer::start().await;
        let extractor = extractor_for(&server);

        let phrases = extractor
            .extract("this is the and of it", &ExtractParams::default())
            .await
            .unwrap();
        assert!(phrases.is_empty());
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_text() {
        let server = MockServer::start().await;
        let extractor = extractor_for(&server);

        let err = extractor
            .extract("   ", &ExtractParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_bad_ngram_range() {
        let server = MockServer::start().await;
        let extractor = extractor_for(&server);

        let params = ExtractParams {
            ngram_range: (3, 1),
            ..ExtractParams::default()
        };
        let err = extractor.extract("some text here", &params).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_extract_propagates_model_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server);
        let err = extractor
            .extract("preserved permafrost puppy", &ExtractParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Embedding(_)));
    }
}
