use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod cache;
mod config;
mod metrics;

use cache::ReportCache;
use config::AppConfig;
use metrics::Metrics;

use enrich::{EnrichError, EnrichedReport, EnrichmentPipeline};
use extract::{ExtractError, ExtractParams};

#[derive(Clone)]
struct AppState {
    pipeline: Arc<EnrichmentPipeline>,
    cache: Arc<ReportCache>,
    metrics: Arc<Metrics>,
    config: AppConfig,
}

#[derive(Serialize)]
struct HealthResponse {
    wikipedia: String,
    embeddings: String,
}

#[derive(Deserialize)]
struct EnrichRequest {
    text: String,
    /// Optional overrides for the configured extraction defaults.
    top_n: Option<usize>,
    ngram_min: Option<usize>,
    ngram_max: Option<usize>,
    diversity: Option<f32>,
}

#[derive(Serialize)]
struct EnrichResponse {
    request_id: String,
    cached: bool,
    report: EnrichedReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::default();
    let pipeline = config.build_pipeline();

    let state = AppState {
        pipeline: Arc::new(pipeline),
        cache: Arc::new(ReportCache::new(config.cache.max_entries)),
        metrics: Metrics::new(),
        config,
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/enrich", post(enrich_text))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;

    tracing::info!("Server listening on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let wikipedia = match reqwest::get(&state.config.endpoints.wikipedia_api_url).await {
        Ok(resp) if resp.status().is_success() => "ok".to_string(),
        Ok(resp) => format!("error: status {}", resp.status()),
        Err(e) => format!("error: {}", e),
    };

    let embeddings = match reqwest::get(&state.config.endpoints.embedding_base_url).await {
        Ok(resp) if resp.status().is_success() => "ok".to_string(),
        Ok(resp) => format!("error: status {}", resp.status()),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        wikipedia,
        embeddings,
    })
}

async fn enrich_text(
    State(state): State<AppState>,
    Json(req): Json<EnrichRequest>,
) -> Result<Json<EnrichResponse>, StatusCode> {
    let defaults = &state.config.extraction;
    let params = ExtractParams {
        top_n: req.top_n.unwrap_or(defaults.top_n),
        ngram_range: (
            req.ngram_min.unwrap_or(defaults.ngram_min),
            req.ngram_max.unwrap_or(defaults.ngram_max),
        ),
        diversity: req.diversity.unwrap_or(defaults.diversity),
    };
    let request_id = uuid::Uuid::new_v4().to_string();

    if state.config.cache.enabled {
        if let Some(report) = state.cache.get(&req.text, &params) {
            state.metrics.record_request(true);
            return Ok(Json(EnrichResponse {
                request_id,
                cached: true,
                report,
            }));
        }
    }

    match state.pipeline.enrich(&req.text, &params).await {
        Ok(report) => {
            state.metrics.record_request(true);
            state.metrics.record_enrich(&report.trace);
            if state.config.cache.enabled {
                state.cache.set(&req.text, &params, report.clone());
            }
            Ok(Json(EnrichResponse {
                request_id,
                cached: false,
                report,
            }))
        }
        Err(EnrichError::Extract(ExtractError::InvalidParams(reason))) => {
            state.metrics.record_request(false);
            tracing::warn!(request_id = %request_id, reason = %reason, "rejected enrichment request");
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            state.metrics.record_request(false);
            tracing::error!(request_id = %request_id, error = %e, "enrichment failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn get_metrics(State(state): State<AppState>) -> Json<metrics::MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
