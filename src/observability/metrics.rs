//! Metrics collection and exposition.
//!
//! # Metrics
//! - `flywheel_requests_total` (counter): requests by method, status, route
//! - `flywheel_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Routes are labelled by fully qualified route name, never raw paths,
//!   to keep cardinality bounded
//! - Recording without an installed exporter is a no-op, so tests and
//!   metrics-disabled deployments pay nothing

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("route", route.to_string()),
    ];
    counter!("flywheel_requests_total", &labels).increment(1);
    histogram!("flywheel_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
