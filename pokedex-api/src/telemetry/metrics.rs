//! Prometheus Metrics Definitions
//!
//! Defines all Pokedex metrics with appropriate labels and types.
//! Exposes a /metrics endpoint for Prometheus scraping.

use axum::{http::StatusCode, response::IntoResponse};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

use crate::error::{ApiError, ApiResult};

/// HTTP request latency buckets (seconds)
/// Covers: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0, 10.0,
];

/// Upstream catalog latency buckets (seconds). The full listing is slow.
const UPSTREAM_LATENCY_BUCKETS: &[f64] = &[0.010, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0, 10.0];

/// Global metrics instance - initialized once at startup
pub static METRICS: Lazy<ApiResult<PokedexMetrics>> = Lazy::new(PokedexMetrics::new);

/// The registered metrics, or `None` if registration failed.
///
/// Registration failure is logged once; recording then becomes a no-op.
pub fn registered_metrics() -> Option<&'static PokedexMetrics> {
    static REPORTED: std::sync::Once = std::sync::Once::new();
    match METRICS.as_ref() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            REPORTED.call_once(|| tracing::error!(error = %e, "Metrics registration failed"));
            None
        }
    }
}

/// Container for all Pokedex metrics.
#[derive(Clone)]
pub struct PokedexMetrics {
    /// HTTP request counter - labels: method, path, status
    pub http_requests_total: CounterVec,

    /// HTTP request duration histogram - labels: method, path
    pub http_request_duration_seconds: HistogramVec,

    /// Name index cache lookups - labels: outcome (hit/miss)
    pub index_cache_lookups_total: CounterVec,

    /// Name index writes back to the cache - labels: status (success/failure)
    pub index_cache_fills_total: CounterVec,

    /// Upstream catalog calls - labels: operation, status
    pub upstream_requests_total: CounterVec,

    /// Upstream catalog latency - labels: operation
    pub upstream_request_duration_seconds: HistogramVec,
}

impl PokedexMetrics {
    /// Create and register all metrics with Prometheus.
    pub fn new() -> ApiResult<Self> {
        Ok(Self {
            http_requests_total: register_counter_vec!(
                "pokedex_http_requests_total",
                "Total number of HTTP requests",
                &["method", "path", "status"]
            )
            .map_err(registration_error("http_requests_total"))?,

            http_request_duration_seconds: register_histogram_vec!(
                "pokedex_http_request_duration_seconds",
                "HTTP request duration in seconds",
                &["method", "path"],
                HTTP_LATENCY_BUCKETS.to_vec()
            )
            .map_err(registration_error("http_request_duration_seconds"))?,

            index_cache_lookups_total: register_counter_vec!(
                "pokedex_index_cache_lookups_total",
                "Name index cache lookups by outcome",
                &["outcome"]
            )
            .map_err(registration_error("index_cache_lookups_total"))?,

            index_cache_fills_total: register_counter_vec!(
                "pokedex_index_cache_fills_total",
                "Name index cache fills by status",
                &["status"]
            )
            .map_err(registration_error("index_cache_fills_total"))?,

            upstream_requests_total: register_counter_vec!(
                "pokedex_upstream_requests_total",
                "Total number of upstream catalog requests",
                &["operation", "status"]
            )
            .map_err(registration_error("upstream_requests_total"))?,

            upstream_request_duration_seconds: register_histogram_vec!(
                "pokedex_upstream_request_duration_seconds",
                "Upstream catalog request duration in seconds",
                &["operation"],
                UPSTREAM_LATENCY_BUCKETS.to_vec()
            )
            .map_err(registration_error("upstream_request_duration_seconds"))?,
        })
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// Record whether the name index was served from the cache.
    pub fn record_index_lookup(&self, hit: bool) {
        let outcome = if hit { "hit" } else { "miss" };
        self.index_cache_lookups_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record a write of the freshly fetched index back to the cache.
    pub fn record_index_fill(&self, success: bool) {
        let status = if success { "success" } else { "failure" };
        self.index_cache_fills_total
            .with_label_values(&[status])
            .inc();
    }

    /// Record an upstream catalog call.
    pub fn record_upstream_request(&self, operation: &str, success: bool, duration_secs: f64) {
        let status = if success { "success" } else { "error" };
        self.upstream_requests_total
            .with_label_values(&[operation, status])
            .inc();
        self.upstream_request_duration_seconds
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}

fn registration_error(name: &'static str) -> impl FnOnce(prometheus::Error) -> ApiError {
    move |e| ApiError::internal_error(format!("Failed to register {}: {}", name, e))
}

/// Handler for GET /metrics endpoint.
///
/// Returns Prometheus text format metrics.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Observability",
    responses(
        (status = 200, description = "Prometheus text format", content_type = "text/plain"),
        (status = 500, description = "Failed to encode metrics"),
    ),
)]
pub async fn metrics_handler() -> impl IntoResponse {
    // Touch the registry so an idle process still exposes its metric families.
    let _ = registered_metrics();

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                format!("Failed to encode metrics: {}", e).into_bytes(),
            )
        }
    }
}
