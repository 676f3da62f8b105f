//! Request-parameter structures for the action APIs.
//!
//! Each request type owns its per-call values and produces the complete
//! outgoing parameter set with a pure method; the fixed parameters live
//! here as literals, not in shared mutable state.

use std::collections::HashSet;

/// One free-text search request (`list=search`).
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
}

impl SearchRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("list", "search".to_string()),
            ("srsearch", self.query.clone()),
        ]
    }
}

/// One batched page-info request (`prop=...&pageids=...`).
#[derive(Debug, Clone)]
pub struct PageInfoRequest {
    pub pageids: Vec<u64>,
}

impl PageInfoRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let pageids = self
            .pageids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|");

        vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("redirects", "1".to_string()),
            ("prop", "pageprops|pageterms|pageimages|extracts".to_string()),
            ("exintro", "1".to_string()),
            ("explaintext", "1".to_string()),
            ("pageids", pageids),
        ]
    }
}

/// One batched entity request (`action=wbgetentities`).
#[derive(Debug, Clone)]
pub struct EntityRequest {
    pub ids: Vec<String>,
}

impl EntityRequest {
    /// Requested ids with duplicates removed, first occurrence wins.
    pub fn distinct_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for id in &self.ids {
            if seen.insert(id.clone()) {
                distinct.push(id.clone());
            }
        }
        distinct
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", "wbgetentities".to_string()),
            ("format", "json".to_string()),
            ("languages", "en".to_string()),
            ("ids", self.distinct_ids().join("|")),
        ]
    }
}
