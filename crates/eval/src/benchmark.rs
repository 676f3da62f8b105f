use anyhow::Result;
use serde::{Deserialize, Serialize};
use statistical::{mean, standard_deviation};
use std::time::Instant;

use enrich::{EnrichedReport, EnrichmentPipeline};
use extract::ExtractParams;

use crate::sample_texts::SamplePassage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub passages: Vec<PassageResult>,
    pub stages: StageSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageResult {
    pub name: String,
    pub total_ms: f64,
    pub keyphrases: usize,
    pub hits: usize,
    pub entities_linked: usize,
    /// Share of expected phrases found in keyphrases or matched titles.
    pub phrase_coverage: f64,
    pub extract_ms: u64,
    pub search_ms: u64,
    pub pages_ms: u64,
    pub entities_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub avg_extract_ms: f64,
    pub std_extract_ms: f64,
    pub avg_search_ms: f64,
    pub std_search_ms: f64,
    pub avg_pages_ms: f64,
    pub std_pages_ms: f64,
    pub avg_entities_ms: f64,
    pub std_entities_ms: f64,
    pub avg_total_ms: f64,
    pub avg_coverage: f64,
}

pub struct Benchmarker {
    pipeline: EnrichmentPipeline,
    params: ExtractParams,
}

impl Benchmarker {
    pub fn new(pipeline: EnrichmentPipeline, params: ExtractParams) -> Self {
        Self { pipeline, params }
    }

    pub async fn run(&self, passages: &[SamplePassage]) -> Result<BenchmarkResults> {
        let mut results = Vec::new();

        for passage in passages {
            println!("Enriching '{}'...", passage.name);

            let start = Instant::now();
            let report = self.pipeline.enrich(&passage.text, &self.params).await?;
            let total_ms = start.elapsed().as_millis() as f64;

            results.push(PassageResult {
                name: passage.name.clone(),
                total_ms,
                keyphrases: report.trace.keyphrases,
                hits: report.trace.hits,
                entities_linked: report.trace.entities_linked,
                phrase_coverage: phrase_coverage(&report, &passage.expected_phrases),
                extract_ms: report.trace.extract_ms,
                search_ms: report.trace.search_ms,
                pages_ms: report.trace.pages_ms,
                entities_ms: report.trace.entities_ms,
            });
        }

        let stages = summarize(&results);
        Ok(BenchmarkResults {
            passages: results,
            stages,
        })
    }
}

/// Share of expected phrases present in the report's keyphrases or the
/// titles of its matched pages, case-insensitive.
pub fn phrase_coverage(report: &EnrichedReport, expected: &[String]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }

    let mut haystack: Vec<String> = report
        .keyphrases
        .iter()
        .map(|k| k.phrase.to_lowercase())
        .collect();
    haystack.extend(report.records.iter().map(|r| r.search.title.to_lowercase()));

    let found = expected
        .iter()
        .filter(|phrase| {
            let phrase = phrase.to_lowercase();
            haystack.iter().any(|h| h.contains(&phrase))
        })
        .count();

    found as f64 / expected.len() as f64
}

fn summarize(results: &[PassageResult]) -> StageSummary {
    let extract: Vec<f64> = results.iter().map(|r| r.extract_ms as f64).collect();
    let search: Vec<f64> = results.iter().map(|r| r.search_ms as f64).collect();
    let pages: Vec<f64> = results.iter().map(|r| r.pages_ms as f64).collect();
    let entities: Vec<f64> = results.iter().map(|r| r.entities_ms as f64).collect();
    let totals: Vec<f64> = results.iter().map(|r| r.total_ms).collect();
    let coverage: Vec<f64> = results.iter().map(|r| r.phrase_coverage).collect();

    StageSummary {
        avg_extract_ms: mean_or_zero(&extract),
        std_extract_ms: std_or_zero(&extract),
        avg_search_ms: mean_or_zero(&search),
        std_search_ms: std_or_zero(&search),
        avg_pages_ms: mean_or_zero(&pages),
        std_pages_ms: std_or_zero(&pages),
        avg_entities_ms: mean_or_zero(&entities),
        std_entities_ms: std_or_zero(&entities),
        avg_total_ms: mean_or_zero(&totals),
        avg_coverage: mean_or_zero(&coverage),
    }
}

fn mean_or_zero(data: &[f64]) -> f64 {
    if data.is_empty() { 0.0 } else { mean(data) }
}

fn std_or_zero(data: &[f64]) -> f64 {
    if data.len() < 2 {
        0.0
    } else {
        standard_deviation(data, None)
    }
}
