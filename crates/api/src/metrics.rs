use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use enrich::EnrichTrace;

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,

    // Per-stage timing (in milliseconds, summed over successful requests)
    total_extract_time_ms: AtomicU64,
    total_search_time_ms: AtomicU64,
    total_pages_time_ms: AtomicU64,
    total_entities_time_ms: AtomicU64,

    // Counts
    total_keyphrases: AtomicUsize,
    total_entities_linked: AtomicUsize,
    enriched_passages: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            total_extract_time_ms: AtomicU64::new(0),
            total_search_time_ms: AtomicU64::new(0),
            total_pages_time_ms: AtomicU64::new(0),
            total_entities_time_ms: AtomicU64::new(0),
            total_keyphrases: AtomicUsize::new(0),
            total_entities_linked: AtomicUsize::new(0),
            enriched_passages: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_enrich(&self, trace: &EnrichTrace) {
        self.enriched_passages.fetch_add(1, Ordering::Relaxed);
        self.total_extract_time_ms.fetch_add(trace.extract_ms, Ordering::Relaxed);
        self.total_search_time_ms.fetch_add(trace.search_ms, Ordering::Relaxed);
        self.total_pages_time_ms.fetch_add(trace.pages_ms, Ordering::Relaxed);
        self.total_entities_time_ms.fetch_add(trace.entities_ms, Ordering::Relaxed);
        self.total_keyphrases.fetch_add(trace.keyphrases, Ordering::Relaxed);
        self.total_entities_linked.fetch_add(trace.entities_linked, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let passages = self.enriched_passages.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            avg_extract_time_ms: avg_ms(&self.total_extract_time_ms, passages),
            avg_search_time_ms: avg_ms(&self.total_search_time_ms, passages),
            avg_pages_time_ms: avg_ms(&self.total_pages_time_ms, passages),
            avg_entities_time_ms: avg_ms(&self.total_entities_time_ms, passages),
            total_keyphrases: self.total_keyphrases.load(Ordering::Relaxed),
            total_entities_linked: self.total_entities_linked.load(Ordering::Relaxed),
        }
    }
}

fn avg_ms(total_ms: &AtomicU64, count: usize) -> f64 {
    let total = total_ms.load(Ordering::Relaxed) as f64;
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub avg_extract_time_ms: f64,
    pub avg_search_time_ms: f64,
    pub avg_pages_time_ms: f64,
    pub avg_entities_time_ms: f64,
    pub total_keyphrases: usize,
    pub total_entities_linked: usize,
}
