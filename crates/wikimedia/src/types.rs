use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One relevance-ranked search hit. The order in which hits arrive from the
/// API is authoritative for everything downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub pageid: u64,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub wordcount: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTerms {
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageProps {
    #[serde(default)]
    pub wikibase_item: Option<String>,
}

/// Extended metadata for one page, keyed by pageid in the batch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub pageid: u64,
    pub title: String,
    /// Intro section as plain text.
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub terms: Option<PageTerms>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub pageprops: PageProps,
    /// Canonical page URL derived from the page id.
    #[serde(default)]
    pub url: String,
}

impl PageInfo {
    /// Wikidata item id linked to this page, if any.
    pub fn wikibase_item(&self) -> Option<&str> {
        self.pageprops.wikibase_item.as_deref()
    }

    pub fn page_url(pageid: u64) -> String {
        format!("http://en.wikipedia.org/wiki?curid={}", pageid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageValue {
    pub language: String,
    pub value: String,
}

/// One knowledge-base record from the entity API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikidataEntity {
    pub id: String,
    #[serde(default)]
    pub labels: HashMap<String, LanguageValue>,
    #[serde(default)]
    pub descriptions: HashMap<String, LanguageValue>,
    /// Claim statements, passed through unparsed.
    #[serde(default)]
    pub claims: Value,
    /// Canonical entity URL derived from the entity id.
    #[serde(default)]
    pub url: String,
}

impl WikidataEntity {
    pub fn entity_url(id: &str) -> String {
        format!("https://www.wikidata.org/wiki/{}", id)
    }

    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(|l| l.value.as_str())
    }
}
