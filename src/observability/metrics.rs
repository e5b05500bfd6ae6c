//! Metrics collection and exposition.
//!
//! # Metrics
//! - `groups_source_requests_total` (counter): requests by source, outcome
//! - `groups_source_request_duration_seconds` (histogram): latency by source
//! - `groups_operations_total` (counter): read operations by operation, outcome
//! - `groups_source_health` (gauge): 1=healthy, 0=unhealthy
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one request to an upstream group source.
pub fn record_source_request(source: &'static str, outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!("groups_source_requests_total", "source" => source, "outcome" => outcome)
        .increment(1);
    ::metrics::histogram!("groups_source_request_duration_seconds", "source" => source)
        .record(elapsed.as_secs_f64());
}

/// Record the outcome of a read operation.
pub fn record_operation(operation: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!("groups_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Record the result of a source health probe.
pub fn record_source_health(source: &'static str, healthy: bool) {
    ::metrics::gauge!("groups_source_health", "source" => source).set(if healthy { 1.0 } else { 0.0 });
}
