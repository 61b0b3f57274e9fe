//! Request metrics.
//!
//! Every transport call records:
//! - a request counter by operation and status
//! - a latency histogram by operation
//! - a timeout counter by operation

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total requests by operation and HTTP status.
    pub const REQUESTS_TOTAL: &str = "facecloud_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "facecloud_request_latency_seconds";

    /// Requests abandoned after the response window elapsed.
    pub const TIMEOUTS_TOTAL: &str = "facecloud_timeouts_total";
}

/// Record metrics for a completed request.
pub fn record_request(operation: &str, status: u16, latency: Duration) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency.as_secs_f64());
}

/// Record an abandoned request.
pub fn record_timeout(operation: &str) {
    counter!(
        names::TIMEOUTS_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}
