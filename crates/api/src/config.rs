use serde::{Deserialize, Serialize};

use enrich::EnrichmentPipeline;
use extract::{EmbeddingClient, ExtractParams, KeyphraseExtractor};
use wikimedia::{EntityClient, PageInfoClient, SearchClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoints: EndpointConfig,
    pub extraction: ExtractionConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub wikipedia_api_url: String,
    pub wikidata_api_url: String,
    pub embedding_base_url: String,
    pub embedding_model: String,
}

/// Extraction defaults applied when a request leaves a knob unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub top_n: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub diversity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig {
                wikipedia_api_url: wikimedia::WIKIPEDIA_API_URL.to_string(),
                wikidata_api_url: wikimedia::WIKIDATA_API_URL.to_string(),
                embedding_base_url: "http://localhost:11434".to_string(),
                embedding_model: "nomic-embed-text".to_string(),
            },
            extraction: ExtractionConfig {
                top_n: 10,
                ngram_min: 1,
                ngram_max: 2,
                diversity: 0.6,
            },
            // The pipeline itself never caches; the service-level report
            // cache is opt-in.
            cache: CacheConfig {
                enabled: false,
                max_entries: 1000,
            },
        }
    }
}

impl ExtractionConfig {
    pub fn to_params(&self) -> ExtractParams {
        ExtractParams {
            top_n: self.top_n,
            ngram_range: (self.ngram_min, self.ngram_max),
            diversity: self.diversity,
        }
    }
}

impl AppConfig {
    /// Assemble the pipeline from the configured endpoints.
    pub fn build_pipeline(&self) -> EnrichmentPipeline {
        EnrichmentPipeline::new(
            KeyphraseExtractor::new(EmbeddingClient::new(
                self.endpoints.embedding_base_url.clone(),
                self.endpoints.embedding_model.clone(),
            )),
            SearchClient::new(self.endpoints.wikipedia_api_url.clone()),
            PageInfoClient::new(self.endpoints.wikipedia_api_url.clone()),
            EntityClient::new(self.endpoints.wikidata_api_url.clone()),
        )
    }
}
