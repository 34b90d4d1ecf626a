//! Metrics collection for the hospital directory
//!
//! Prometheus metrics registered in the default registry and exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hospital_directory_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "hospital_directory_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "hospital_directory_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// HTTP response size in bytes
    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "hospital_directory_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Directory Metrics

    /// Directory writes by entity, operation and outcome
    pub static ref DIRECTORY_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hospital_directory_operations_total",
        "Total number of directory write operations",
        &["entity", "operation", "status"]
    )
    .expect("Failed to register DIRECTORY_OPERATIONS_TOTAL");

    /// Recommendation queries by outcome (empty_issue, matched, no_match)
    pub static ref RECOMMENDATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hospital_directory_recommendations_total",
        "Total number of recommendation queries",
        &["outcome"]
    )
    .expect("Failed to register RECOMMENDATIONS_TOTAL");

    /// Hospitals returned per recommendation query
    pub static ref RECOMMENDATION_RESULTS: HistogramVec = register_histogram_vec!(
        "hospital_directory_recommendation_results",
        "Number of hospitals returned by a recommendation query",
        &["source"],
        vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 25.0]
    )
    .expect("Failed to register RECOMMENDATION_RESULTS");
}

/// Record the outcome of a directory write
pub fn record_operation(entity: &str, operation: &str, success: bool) {
    let status = if success { "success" } else { "error" };
    DIRECTORY_OPERATIONS_TOTAL
        .with_label_values(&[entity, operation, status])
        .inc();
}

/// `path` label for requests that matched no route
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// `path` label for a request: the route template it matched, never the raw URI
pub fn route_label(matched: Option<&str>) -> &str {
    matched.unwrap_or(UNMATCHED_ROUTE)
}

/// Holds one in-flight slot and releases it when dropped, including when the
/// request future is abandoned mid-flight.
pub struct InFlightGuard(IntGauge);

impl InFlightGuard {
    pub fn new(gauge: IntGauge) -> Self {
        gauge.inc();
        Self(gauge)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Extract the directory entity a path addresses
pub fn extract_entity(path: &str) -> Option<&'static str> {
    let first = path.split('/').find(|s| !s.is_empty())?;
    match first {
        "hospitals" | "hospital" => Some("hospital"),
        "specialties" => Some("specialty"),
        "patients" => Some("patient"),
        "appointments" => Some("appointment"),
        "issue-maps" => Some("issue_map"),
        "dashboard" => Some("dashboard"),
        "api" => Some("recommendation"),
        _ => None,
    }
}
