//! Pokedex Telemetry - Observability Infrastructure
//!
//! Structured logging through `tracing-subscriber` and Prometheus metrics
//! for the HTTP layer and the name index.

pub mod metrics;
pub mod middleware;
pub mod tracer;

pub use metrics::{metrics_handler, registered_metrics, PokedexMetrics, METRICS};
pub use middleware::observability_middleware;
pub use tracer::{init_tracing, LogFormat, TelemetryConfig};
