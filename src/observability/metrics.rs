//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echoes_requests_total` (counter): requests by kind (classify, forward) and status
//! - `echoes_forward_duration_seconds` (histogram): upstream fetch latency by route
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_classified(status: u16) {
    counter!("echoes_requests_total", "kind" => "classify", "status" => status.to_string()).increment(1);
}

pub fn record_forwarded(route: &str, status: u16, elapsed: Duration) {
    counter!("echoes_requests_total", "kind" => "forward", "status" => status.to_string()).increment(1);
    histogram!("echoes_forward_duration_seconds", "route" => route.to_string()).record(elapsed.as_secs_f64());
}
