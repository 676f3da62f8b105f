use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use enrich::EnrichedReport;
use extract::ExtractParams;

/// Service-level cache of finished reports, keyed by passage and
/// extraction parameters.
pub struct ReportCache {
    reports: Arc<DashMap<String, EnrichedReport>>,
    max_entries: usize,
}

impl ReportCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            reports: Arc::new(DashMap::new()),
            max_entries,
        }
    }

    pub fn get(&self, text: &str, params: &ExtractParams) -> Option<EnrichedReport> {
        let key = self.cache_key(text, params);
        self.reports.get(&key).map(|r| r.value().clone())
    }

    pub fn set(&self, text: &str, params: &ExtractParams, report: EnrichedReport) {
        if self.reports.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self.reports.iter()
                .take(self.max_entries / 4)
                .map(|r| r.key().clone())
                .collect();
            for key in to_remove {
                self.reports.remove(&key);
            }
        }
        let key = self.cache_key(text, params);
        self.reports.insert(key, report);
    }

    fn cache_key(&self, text: &str, params: &ExtractParams) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(params.top_n.to_string().as_bytes());
        hasher.update(params.ngram_range.0.to_string().as_bytes());
        hasher.update(params.ngram_range.1.to_string().as_bytes());
        hasher.update(params.diversity.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            reports_cached: self.reports.len(),
        }
    }

    pub fn clear(&self) {
        self.reports.clear();
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CacheStats {
    pub reports_cached: usize,
}
